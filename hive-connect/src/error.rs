use core::fmt;


/// Different `Hive` Error types
///
/// Every error is terminal for the operation or session that produced it;
/// nothing in this crate retries on the caller's behalf.
#[derive(Clone, Debug, PartialEq)]
pub enum HiveError {
    /// A typed column value could not be converted to the requested type.
    Conversion(String),
    /// Building an Arrow batch from a result page failed.
    Arrow(String),
    /// The server reported a non-success application status.
    Application { status: String },
    /// Caller supplied an unusable option or argument.
    InvalidArgument(String),
    InvalidConnectionUrl(String),
    /// The operation reached a failed terminal state on the server.
    OperationFailed {
        state: String,
        message: String,
        sql_state: Option<String>,
        error_code: Option<i32>,
    },
    /// The server no longer knows the operation handle.
    OperationGone(String),
    /// The RPC call itself failed (malformed response, RPC-layer exception).
    Protocol(String),
    /// The session was never opened, already closed, or not returned by the server.
    Session(String),
    /// The transport binding could not be opened.
    Transport(String),
}

impl fmt::Display for HiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HiveError::Conversion(msg) => write!(f, "Conversion Error: {}", msg),
            HiveError::Arrow(msg) => write!(f, "Arrow Error: {}", msg),
            HiveError::Application { status } => write!(f, "Error from server: {}", status),
            HiveError::InvalidArgument(msg) => write!(f, "Invalid Argument: {}", msg),
            HiveError::InvalidConnectionUrl(msg) => write!(f, "Invalid Connection URL: {}", msg),
            HiveError::OperationFailed { state, message, sql_state, error_code } => {
                write!(f, "Operation {}: {}", state, message)?;
                if let Some(sql_state) = sql_state {
                    write!(f, " (SQLSTATE {})", sql_state)?;
                }
                if let Some(code) = error_code {
                    write!(f, " [code {}]", code)?;
                }
                Ok(())
            }
            HiveError::OperationGone(msg) => write!(f, "Operation Gone: {}", msg),
            HiveError::Protocol(msg) => write!(f, "Protocol Error: {}", msg),
            HiveError::Session(msg) => write!(f, "Session Error: {}", msg),
            HiveError::Transport(msg) => write!(f, "Transport Error: {}", msg),
        }
    }
}

impl std::error::Error for HiveError {}

impl From<arrow::error::ArrowError> for HiveError {
    fn from(error: arrow::error::ArrowError) -> Self {
        HiveError::Arrow(error.to_string())
    }
}

impl From<url::ParseError> for HiveError {
    fn from(error: url::ParseError) -> Self {
        HiveError::InvalidConnectionUrl(error.to_string())
    }
}

impl From<tonic::codegen::http::uri::InvalidUri> for HiveError {
    fn from(error: tonic::codegen::http::uri::InvalidUri) -> Self {
        HiveError::InvalidConnectionUrl(error.to_string())
    }
}

impl From<tonic::transport::Error> for HiveError {
    fn from(error: tonic::transport::Error) -> Self {
        HiveError::Transport(error.to_string())
    }
}

/// Any status returned by an RPC call is a call-level failure, whatever its
/// code; application failures travel inside successful responses.
impl From<tonic::Status> for HiveError {
    fn from(status: tonic::Status) -> Self {
        HiveError::Protocol(format!("{:?}: {}", status.code(), status.message()))
    }
}
