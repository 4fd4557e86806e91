//! Query and pool metrics.
//!
//! Values go to whatever `metrics` recorder the host process installed; with
//! none installed the calls are no-ops.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Record how long a named query took.
pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!("taskboard_db_query_duration_seconds", "query" => query_name).record(duration_secs);
}

/// Record connection pool occupancy.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("taskboard_db_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("taskboard_db_connections_idle").set(idle as f64);
    gauge!("taskboard_db_connections_total").set(size as f64);
}

/// Times a single repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_task_by_id");
/// let result = sqlx::query_as::<_, TaskEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_keeps_name() {
        let timer = QueryTimer::new("find_all_tags");
        assert_eq!(timer.query_name, "find_all_tags");
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        QueryTimer::new("noop").record();
        record_query_duration("noop", 0.5);
    }
}
