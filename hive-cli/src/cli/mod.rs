pub mod commands;
pub mod error;
pub mod output;
pub mod ux;

use hive_connect::{HiveError, Options};
pub use clap::Parser;


#[derive(Parser, Debug)]
#[command(name = "hive", version, about = "Run SQL statements against a Hive-compatible server and print their results.")]
pub struct Cli {
    #[arg(
        long = "url",
        help = "Connection URL, e.g.:
    hive2://<username>:<password>@<host>:<port>/<database>?batch_size=<rows>\n",
        env = "HIVE_URL",
        hide_env_values = true
    )]
    pub url: String,

    #[arg(
        required = true,
        num_args = 1..,
        help = "SQL statements, run in order. Execution stops at the first failing statement."
    )]
    pub statements: Vec<String>,

    #[arg(
        long,
        help = "Submit the statements without reading any rows (DDL, DML).",
    )]
    pub exec: bool,

    #[arg(
        long,
        help = "Seconds between two operation status polls. Overrides the URL's poll_interval.",
    )]
    pub poll_interval: Option<u64>,

    #[arg(
        long,
        help = "Maximum rows requested per fetch. Overrides the URL's batch_size.",
    )]
    pub batch_size: Option<i64>,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Set level of verbosity. [default: INFO]\n\t-v: DEBUG\n\t-vv: TRACE\n--quiet takes precedence over --verbose."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Disable all information logs (only ERROR level logs are shown).\n--quiet takes precedence over --verbose."
    )]
    pub quiet: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Enable JSON output format. Human readable output is disabled when this flag is set."
    )]
    pub json: bool,
}

impl Cli {
    /// Name reported in the output envelope.
    pub fn command_name(&self) -> &'static str {
        if self.exec { "exec" } else { "query" }
    }

    /// Connection options from `--url`, with command line overrides applied.
    pub fn options(&self) -> Result<Options, HiveError> {
        let mut options = Options::from_url(&self.url)?;

        if let Some(seconds) = self.poll_interval {
            options = options.with_poll_interval_seconds(seconds);
        }
        if let Some(batch_size) = self.batch_size {
            options = options.with_batch_size(batch_size);
        }

        Ok(options)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_statements_and_overrides() {
        let cli = Cli::try_parse_from([
            "hive",
            "--url",
            "hive2://localhost:10000/sales?batch_size=50",
            "--batch-size",
            "7",
            "--exec",
            "CREATE TABLE t (id INT)",
            "INSERT INTO t VALUES (1)",
        ])
        .unwrap();

        assert_eq!(cli.statements.len(), 2);
        assert_eq!(cli.command_name(), "exec");

        let options = cli.options().unwrap();
        assert_eq!(options.batch_size, 7);
        assert_eq!(options.poll_interval_seconds, 5);
        assert_eq!(options.database.as_deref(), Some("sales"));
    }

    #[test]
    fn requires_at_least_one_statement() {
        let result = Cli::try_parse_from(["hive", "--url", "hive2://localhost"]);

        assert!(result.is_err());
    }

    #[test]
    fn bad_url_is_reported() {
        let cli = Cli::try_parse_from(["hive", "--url", "http://localhost", "SELECT 1"]).unwrap();

        assert!(matches!(cli.options(), Err(HiveError::InvalidConnectionUrl(_))));
    }
}
