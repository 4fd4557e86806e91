use anyhow::Result;
use clap::Parser;
use persistence::Database;
use tracing::info;

mod cli;
mod config;
mod logging;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::Config::load()?;
    if let Some(schema) = cli.schema {
        config.database.schema = schema;
    }

    logging::init_logging(&config.logging);

    info!(
        command = ?cli.command,
        schema = %config.database.schema,
        "taskboard-admin v{}",
        env!("CARGO_PKG_VERSION")
    );

    let db = Database::connect(&config.database).await?;
    let result = run(&db, cli.command).await;
    db.disconnect().await;
    result
}

async fn run(db: &Database, command: Command) -> Result<()> {
    let manager = db.manager();
    match command {
        Command::Migrate => manager.migrate().await?,
        Command::Seed => {
            let summary = manager.add_dummy_data().await?;
            println!("{summary:#?}");
        }
        Command::Clear => manager.clear_all_tables().await?,
        Command::ResetSequences => manager.reset_sequences().await?,
        Command::Reset => {
            let summary = manager.reset().await?;
            println!("{summary:#?}");
        }
        Command::Check => {
            for (table, count) in manager.table_counts().await? {
                println!("{table:<36} {count:>8}");
            }
        }
    }
    Ok(())
}
