use crate::error::{CliError, CliErrorKind};
use crate::output::StatementResult;
use hive_connect::{Connection, HiveError, Options};


/// Opens a session on the server named by `options`.
pub async fn connect(options: Options) -> Result<Connection, CliError> {
    let endpoint = options.endpoint();
    tracing::info!("Connecting to '{endpoint}'...");

    Connection::connect(&endpoint, options)
        .await
        .map_err(|e| CliError { kind: CliErrorKind::Connection(e) })
}

/// Runs every statement in order, appending each outcome to `results`.
/// Stops at the first failing statement.
pub async fn run(
    conn: &Connection,
    statements: &[String],
    exec: bool,
    results: &mut Vec<StatementResult>,
) -> Result<(), CliError> {
    for (index, sql) in statements.iter().enumerate() {
        tracing::info!("Running statement {}/{}...", index + 1, statements.len());

        let result = if exec {
            exec_statement(conn, sql).await
        } else {
            query_statement(conn, sql).await
        };

        match result {
            Ok(result) => results.push(result),
            Err(source) => {
                return Err(CliError { kind: CliErrorKind::Statement { index, source } });
            }
        }
    }

    Ok(())
}

/// Closes the session; called whether or not the statements succeeded.
pub async fn close(conn: &Connection) -> Result<(), CliError> {
    conn.close()
        .await
        .map_err(|e| CliError { kind: CliErrorKind::Close(e) })
}

async fn query_statement(conn: &Connection, sql: &str) -> Result<StatementResult, HiveError> {
    let mut rows = conn.query(sql).await?;

    let schema = rows.schema().await?;
    let columns = schema.fields().iter().map(|field| field.name().clone()).collect();
    let rows = rows.collect().await?;

    tracing::info!("Statement returned {} row(s)", rows.len());

    Ok(StatementResult {
        statement: sql.to_string(),
        columns,
        rows,
    })
}

async fn exec_statement(conn: &Connection, sql: &str) -> Result<StatementResult, HiveError> {
    conn.exec(sql).await?;

    Ok(StatementResult {
        statement: sql.to_string(),
        columns: vec![],
        rows: vec![],
    })
}
