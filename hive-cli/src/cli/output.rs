// {
//   "command": "query",
//   "status": "success",
//   "data": [
//     {
//       "statement": "SELECT id, name FROM users",
//       "columns": ["id", "name"],
//       "rows": [[1, "alice"], [2, null]]
//     }
//   ],
//   "error": null
// }
use crate::error::{CliError, CliErrorKind};
use hive_connect::Row;
use serde::Serialize;


#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum CliErrorJson {
    Connection(String),
    Close(String),
    Statement(String),
    Logging(String),
}

impl From<&CliError> for CliErrorJson {
    fn from(e: &CliError) -> Self {
        let message = e.kind.to_string();

        match &e.kind {
            CliErrorKind::Connection(_) => Self::Connection(message),
            CliErrorKind::Close(_) => Self::Close(message),
            CliErrorKind::Statement { .. } => Self::Statement(message),
            CliErrorKind::SetGlobalDefault(_) => Self::Logging(message),
        }
    }
}


#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CliStatus {
    Success,
    Error,
}

/// Outcome of one statement.
#[derive(Serialize, Debug)]
pub struct StatementResult {
    pub statement: String,
    /// Empty for statements submitted with `--exec`.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Serialize)]
pub struct CliOutput<T: Serialize> {
    pub command: String,
    pub status: CliStatus,
    pub data: Option<T>,
    pub error: Option<CliErrorJson>,
}

impl<T: Serialize> CliOutput<T> {
    pub fn new(command: &str, data: Option<T>, error: Option<&CliError>) -> Self {
        Self {
            command: command.to_string(),
            status: if error.is_some() { CliStatus::Error } else { CliStatus::Success },
            data,
            error: error.map(CliErrorJson::from),
        }
    }
}
