use hive_connect::HiveError;

use std::error::Error;
use std::fmt;
use tracing::subscriber::SetGlobalDefaultError;


#[derive(Debug)]
pub struct CliError {
    pub kind: CliErrorKind
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HiveCliError: {}", self.kind)
    }
}

impl Error for CliError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum CliErrorKind {
    Connection(HiveError),
    Close(HiveError),
    Statement { index: usize, source: HiveError },
    SetGlobalDefault(SetGlobalDefaultError),
}

impl fmt::Display for CliErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection(error) => write!(f, "Failed to connect: {error}"),
            Self::Close(error) => write!(f, "Failed to close session: {error}"),
            Self::Statement { index, source } => write!(f, "Statement {} failed: {source}", index + 1),
            Self::SetGlobalDefault(error) => write!(f, "Failed to set global default subscriber: {}", error),
        }
    }
}

impl Error for CliErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Connection(source) => Some(source),
			Self::Close(source) => Some(source),
			Self::Statement { source, .. } => Some(source),
			Self::SetGlobalDefault(source) => Some(source),
		}
	}
}

impl From<SetGlobalDefaultError> for CliError {
    fn from(error: SetGlobalDefaultError) -> Self {
        CliError { kind: CliErrorKind::SetGlobalDefault(error) }
    }
}
