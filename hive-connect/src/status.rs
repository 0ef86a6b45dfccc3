//! Interpretation of the status fields carried by `TCLIService` responses.
use crate::error::HiveError;
use crate::tcli::{TOperationState, TStatus, TStatusCode};


/// Whether an application-level call succeeded.
///
/// Only [`TStatusCode::SuccessStatus`] and [`TStatusCode::SuccessWithInfoStatus`]
/// count as success. This is checked after every RPC that carries a status.
pub fn is_success(code: TStatusCode) -> bool {
    matches!(code, TStatusCode::SuccessStatus | TStatusCode::SuccessWithInfoStatus)
}

/// Checks a response status, turning anything but success into
/// [`HiveError::Application`].
///
/// A missing status is a malformed response. Unknown codes are a protocol
/// error when `strict` and a plain application failure otherwise.
pub(crate) fn check(status: Option<&TStatus>, strict: bool) -> Result<(), HiveError> {
    let status = status.ok_or_else(|| {
        HiveError::Protocol("response carries no status".to_string())
    })?;

    match TStatusCode::try_from(status.status_code) {
        Ok(code) if is_success(code) => Ok(()),
        Ok(_) => Err(HiveError::Application { status: describe(status) }),
        Err(_) if strict => Err(HiveError::Protocol(format!(
            "unknown status code {}",
            status.status_code
        ))),
        Err(_) => Err(HiveError::Application { status: describe(status) }),
    }
}

/// Human-readable rendering of a status, used as the application error text.
pub fn describe(status: &TStatus) -> String {
    let code = match TStatusCode::try_from(status.status_code) {
        Ok(code) => code.as_str_name().to_string(),
        Err(_) => format!("UNKNOWN_STATUS({})", status.status_code),
    };

    let mut text = code;
    if let Some(message) = &status.error_message {
        text.push_str(": ");
        text.push_str(message);
    }
    if let Some(sql_state) = &status.sql_state {
        text.push_str(&format!(" (SQLSTATE {})", sql_state));
    }
    if let Some(error_code) = status.error_code {
        text.push_str(&format!(" [code {}]", error_code));
    }
    text
}

/// How the cursor must react to a reported operation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationStatus {
    /// Not terminal yet; poll again after the interval.
    Running(TOperationState),
    /// Terminal success; results may be fetched.
    Finished,
    /// Terminal failure (error, canceled, timed out).
    Failed(TOperationState),
    /// The server no longer knows the handle (closed, unknown).
    Gone(TOperationState),
}

impl OperationStatus {
    pub fn classify(state: TOperationState) -> Self {
        match state {
            TOperationState::InitializedState
            | TOperationState::PendingState
            | TOperationState::RunningState => OperationStatus::Running(state),
            TOperationState::FinishedState => OperationStatus::Finished,
            TOperationState::ErrorState
            | TOperationState::CanceledState
            | TOperationState::TimedoutState => OperationStatus::Failed(state),
            TOperationState::ClosedState | TOperationState::UkState => OperationStatus::Gone(state),
        }
    }

    /// Decodes a raw wire state. A missing or unknown state is `UkState`
    /// unless `strict`, where it is a protocol error.
    pub(crate) fn from_wire(raw: Option<i32>, strict: bool) -> Result<Self, HiveError> {
        let state = match raw {
            Some(value) => match TOperationState::try_from(value) {
                Ok(state) => state,
                Err(_) if strict => {
                    return Err(HiveError::Protocol(format!("unknown operation state {}", value)));
                }
                Err(_) => TOperationState::UkState,
            },
            None if strict => {
                return Err(HiveError::Protocol(
                    "status response carries no operation state".to_string(),
                ));
            }
            None => TOperationState::UkState,
        };
        Ok(Self::classify(state))
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OperationStatus::Running(_))
    }
}
