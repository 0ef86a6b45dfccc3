//! Session management.
//!
//! This module provides [`Connection`], which owns one authenticated server
//! session over one transport binding. A connection is opened with
//! [`Connection::connect`] (or [`Connection::connect_with_user`]), used to
//! submit statements, and closed with [`Connection::close`].
//!
//! # Typical usage
//!
//! ```no_run
//! use hive_connect::{Connection, Options};
//!
//! # tokio_test::block_on(async {
//! let conn = Connection::connect("localhost:10000", Options::default())
//!     .await
//!     .expect("failed to connect");
//!
//! let mut rows = conn.query("SELECT id, name FROM users").await.unwrap();
//! while let Some(row) = rows.next().await.unwrap() {
//!     let id: i64 = row.get(0).unwrap();
//!     println!("{id}");
//! }
//!
//! conn.close().await.unwrap();
//! # });
//! ```
//!
//! The connection is never re-established implicitly and is not closed on
//! drop: call [`Connection::close`] to release the server-side session.
use crate::client::{GrpcTransport, TcliService};
use crate::query::Statement;
use crate::rowset::RowSet;
use crate::status;
use crate::tcli;
use crate::{HiveError, Options};

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};


/// Session configuration key selecting the initial database.
const USE_DATABASE: &str = "use:database";

/// The transport binding and the session it carries.
///
/// Shared by the connection and every cursor it creates; `session` is `None`
/// once the connection is closed, which stops every further RPC.
pub(crate) struct Binding {
    service: Box<dyn TcliService>,
    session: Option<tcli::TSessionHandle>,
}

impl Binding {
    /// Hands out the service for one RPC, provided the session is still open.
    pub(crate) fn open_service(
        &mut self,
    ) -> Result<(&mut dyn TcliService, tcli::TSessionHandle), HiveError> {
        match &self.session {
            Some(handle) => Ok((self.service.as_mut(), handle.clone())),
            None => Err(HiveError::Session("connection is closed".to_string())),
        }
    }
}

pub(crate) type SharedBinding = Arc<Mutex<Binding>>;

/// Represents an open session on a Hive server.
///
/// The connection exclusively owns its transport binding. Statements and
/// cursors created from it share that binding; concurrent use from several
/// tasks is serialized call by call, but ordering between tasks is up to
/// the caller.
pub struct Connection {
    binding: SharedBinding,
    options: Arc<Options>,
    session_id: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Connects to `host_port` over gRPC and opens a session.
    ///
    /// Credentials in `options` are sent if present. Fails with
    /// [`HiveError::Transport`] if the server cannot be reached,
    /// [`HiveError::Protocol`] if the open-session call fails, and
    /// [`HiveError::Session`] if the server hands back no session.
    pub async fn connect(host_port: &str, options: Options) -> Result<Self, HiveError> {
        options.validate()?;
        let transport = GrpcTransport::connect(host_port, &options).await?;
        Self::open(transport, options).await
    }

    /// Same as [`Connection::connect`], authenticating as `username`.
    pub async fn connect_with_user(
        host_port: &str,
        username: &str,
        password: &str,
        options: Options,
    ) -> Result<Self, HiveError> {
        Self::connect(host_port, options.with_credentials(username, password)).await
    }

    /// Opens a session over an already established transport binding.
    pub async fn open<S>(service: S, options: Options) -> Result<Self, HiveError>
    where
        S: TcliService + 'static,
    {
        options.validate()?;
        let mut service: Box<dyn TcliService> = Box::new(service);

        let mut configuration = HashMap::new();
        if let Some(database) = &options.database {
            configuration.insert(USE_DATABASE.to_string(), database.clone());
        }

        let req = tcli::TOpenSessionReq {
            client_protocol: tcli::CLIENT_PROTOCOL.into(),
            username: options.username.clone(),
            password: options.password.clone(),
            configuration,
        };

        let resp = service.open_session(req).await?;
        status::check(resp.status.as_ref(), options.strict_read())?;

        let handle = resp
            .session_handle
            .filter(|handle| handle.session_id.is_some())
            .ok_or_else(|| {
                HiveError::Session("server returned no session handle".to_string())
            })?;
        let session_id = handle
            .session_id
            .as_ref()
            .map(|id| id.guid_string())
            .unwrap_or_default();

        info!(
            session_id = %session_id,
            username = ?options.username,
            "Session opened"
        );

        Ok(Self {
            binding: Arc::new(Mutex::new(Binding {
                service,
                session: Some(handle),
            })),
            options: Arc::new(options),
            session_id,
        })
    }

    /// Returns the server-assigned session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub async fn is_open(&self) -> bool {
        self.binding.lock().await.session.is_some()
    }

    /// Closes the session. After this the connection is invalid for other use.
    ///
    /// Closing an already closed connection is a no-op. If the close call
    /// fails the error is returned, but the connection is closed locally all
    /// the same.
    pub async fn close(&self) -> Result<(), HiveError> {
        let mut binding = self.binding.lock().await;

        let Some(handle) = binding.session.take() else {
            return Ok(());
        };

        let req = tcli::TCloseSessionReq {
            session_handle: Some(handle),
        };

        let result = match binding.service.close_session(req).await {
            Ok(resp) => match status::check(resp.status.as_ref(), self.options.strict_read()) {
                Ok(()) => Ok(()),
                Err(error) => Err(close_error(Some(&resp), error)),
            },
            Err(error) => Err(close_error(None, error)),
        };

        match &result {
            Ok(()) => info!(session_id = %self.session_id, "Session closed"),
            Err(e) => warn!(session_id = %self.session_id, error = %e, "Session closed locally, server close failed"),
        }

        result
    }

    /// Returns a [`Statement`] for `sql`, to add configuration before it
    /// is submitted.
    pub fn statement(&self, sql: &str) -> Statement<'_> {
        Statement::new(self, sql)
    }

    /// Issues a query on an open connection, returning a [`RowSet`] which
    /// polls the operation and pages through its results.
    pub async fn query(&self, sql: &str) -> Result<RowSet, HiveError> {
        self.statement(sql).query().await
    }

    /// Submits a statement and returns the raw server response, for callers
    /// that do not read rows (DDL, DML).
    pub async fn exec(&self, sql: &str) -> Result<tcli::TExecuteStatementResp, HiveError> {
        self.statement(sql).exec().await
    }

    /// Sends one `ExecuteStatement` and checks its application status.
    pub(crate) async fn execute(
        &self,
        sql: &str,
        conf_overlay: HashMap<String, String>,
        run_async: bool,
        query_timeout: i64,
    ) -> Result<tcli::TExecuteStatementResp, HiveError> {
        if self.options.strict_write() && sql.trim().is_empty() {
            return Err(HiveError::InvalidArgument("statement is empty".to_string()));
        }

        let resp = {
            let mut binding = self.binding.lock().await;
            let (service, session_handle) = binding.open_service()?;

            debug!(session_id = %self.session_id, sql = %sql, run_async, "Executing statement");

            let req = tcli::TExecuteStatementReq {
                session_handle: Some(session_handle),
                statement: sql.to_string(),
                conf_overlay,
                run_async,
                query_timeout,
            };
            service.execute_statement(req).await?
        };

        status::check(resp.status.as_ref(), self.options.strict_read())?;

        Ok(resp)
    }

    pub(crate) fn cursor(&self, handle: tcli::TOperationHandle) -> RowSet {
        RowSet::new(self.binding.clone(), self.options.clone(), handle)
    }
}

/// Error reported by a failed close: carries both the response (if one
/// arrived) and the underlying error.
fn close_error(resp: Option<&tcli::TCloseSessionResp>, error: HiveError) -> HiveError {
    let context = match resp {
        Some(resp) => format!("Error closing session: {:?}", resp),
        None => "Error closing session: no response".to_string(),
    };

    match error {
        HiveError::Application { status } => HiveError::Application {
            status: format!("{}, {}", context, status),
        },
        HiveError::Protocol(msg) => HiveError::Protocol(format!("{}, {}", context, msg)),
        other => other,
    }
}
