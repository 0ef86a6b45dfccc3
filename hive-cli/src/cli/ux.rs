use crate::error::CliError;
use crate::output::{CliOutput, StatementResult};


pub fn setup_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), CliError> {
    if json {
        // Mute all logging if JSON output is enabled
        tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())?;
        return Ok(());
    }

    let level = if quiet {
        tracing::Level::ERROR
    } else { match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }};

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}


/// Tab separated rendering of one statement's result: a header line, then
/// one line per row.
pub fn format_result(result: &StatementResult) -> String {
    let mut output = String::new();

    if !result.columns.is_empty() {
        output.push_str(&result.columns.join("\t"));
        output.push('\n');
    }

    for row in &result.rows {
        let cells: Vec<String> = row.values().iter().map(|value| value.to_string()).collect();
        output.push_str(&cells.join("\t"));
        output.push('\n');
    }

    output
}


/// Every result in order, each row-returning one followed by its row count.
pub fn format_output(output: &CliOutput<Vec<StatementResult>>) -> String {
    let mut rendered = String::new();

    for result in output.data.iter().flatten() {
        rendered.push_str(&format_result(result));

        if !result.columns.is_empty() {
            rendered.push_str(&format!("({} row(s))\n", result.rows.len()));
        }
    }

    rendered
}


pub fn render_human_output(output: &CliOutput<Vec<StatementResult>>) {
    let rendered = format_output(output);

    if !rendered.is_empty() {
        print!("{}", rendered);
    }

    if let Some(error) = &output.error {
        tracing::error!("{:?}", error);
    }
}
