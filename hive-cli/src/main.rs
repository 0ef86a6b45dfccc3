mod cli;

use clap::Parser;
use cli::{commands, error, output, ux};
use output::{CliOutput, CliStatus, StatementResult};


async fn run_command(args: &cli::Cli) -> CliOutput<Vec<StatementResult>> {
    let command = args.command_name();

    let options = match args.options() {
        Ok(options) => options,
        Err(e) => {
            let error = error::CliError { kind: error::CliErrorKind::Connection(e) };
            return CliOutput::new(command, None, Some(&error));
        }
    };

    let conn = match commands::connect(options).await {
        Ok(conn) => conn,
        Err(error) => return CliOutput::new(command, None, Some(&error)),
    };

    let mut results = Vec::new();
    let outcome = commands::run(&conn, &args.statements, args.exec, &mut results).await;

    // The session is released whether or not the statements succeeded.
    let closed = commands::close(&conn).await;

    match outcome.and(closed) {
        Ok(()) => CliOutput::new(command, Some(results), None),
        Err(error) => CliOutput::new(command, Some(results), Some(&error)),
    }
}


/// Entry point for the `hive` command line client.
///
/// Connects to the server named by `--url` (or `HIVE_URL`), runs each
/// positional SQL statement in order, prints the results and closes the
/// session. With `--exec`, statements are submitted without reading rows.
#[tokio::main]
async fn main() {
    let args: cli::Cli = cli::Cli::parse();

    if let Err(e) = ux::setup_logging(args.verbose, args.quiet, args.json) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let result = run_command(&args).await;

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize output: {e}");
                std::process::exit(1);
            }
        }
    } else {
        ux::render_human_output(&result);
    }

    if let CliStatus::Error = result.status {
        std::process::exit(1);
    }
}
