use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "taskboard-admin")]
#[command(about = "Schema maintenance for the Taskboard database")]
#[command(version)]
pub struct Cli {
    /// Use this schema instead of the configured one
    #[arg(long, global = true)]
    pub schema: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Apply pending migrations
    Migrate,

    /// Insert the demo dataset
    Seed,

    /// Delete every row from every table
    Clear,

    /// Restart the id and working number sequences
    ResetSequences,

    /// Clear, restart sequences and seed again
    Reset,

    /// Connect and print row counts per table
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["taskboard-admin", "reset-sequences"]).unwrap();
        assert_eq!(cli.command, Command::ResetSequences);
        assert!(cli.schema.is_none());

        let cli = Cli::try_parse_from(["taskboard-admin", "seed"]).unwrap();
        assert_eq!(cli.command, Command::Seed);
    }

    #[test]
    fn test_schema_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["taskboard-admin", "check", "--schema", "demo"]).unwrap();
        assert_eq!(cli.command, Command::Check);
        assert_eq!(cli.schema.as_deref(), Some("demo"));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["taskboard-admin"]).is_err());
        assert!(Cli::try_parse_from(["taskboard-admin", "drop-everything"]).is_err());
    }
}
