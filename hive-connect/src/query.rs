//! Statement submission through [`Connection::statement`].
//!
//! # Overview
//!
//! [`Statement`] is a small builder around one `ExecuteStatement` call. It
//! is tied to the connection that created it and lets callers attach
//! per-statement configuration before choosing how to submit:
//!
//! - `.query()` submits asynchronously and returns a [`RowSet`] that polls
//!   the operation and pages through its results.
//! - `.exec()` returns the raw server response, for statements whose rows
//!   are not read (DDL, DML).
//!
//! # Example
//!
//! ```no_run
//! use hive_connect::{Connection, Options};
//!
//! # tokio_test::block_on(async {
//! let conn = Connection::connect("localhost:10000", Options::default()).await.unwrap();
//!
//! let mut rows = conn
//!     .statement("SELECT COUNT(*) FROM events")
//!     .conf("hive.exec.parallel", "true")
//!     .query()
//!     .await
//!     .unwrap();
//!
//! let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
//! # });
//! ```
//!
//! # Errors
//!
//! Returns [`HiveError::Session`] once the connection is closed,
//! [`HiveError::Protocol`] when the call fails, and
//! [`HiveError::Application`] when the server rejects the statement.
use crate::rowset::RowSet;
use crate::session::Connection;
use crate::tcli;
use crate::HiveError;

use std::collections::HashMap;
use std::time::Duration;


pub struct Statement<'a> {
    connection: &'a Connection,
    sql: String,
    conf_overlay: HashMap<String, String>,
    run_async: Option<bool>,
    timeout: Option<Duration>,
}

impl<'a> Statement<'a> {
    pub(crate) fn new(connection: &'a Connection, sql: &str) -> Self {
        Self {
            connection,
            sql: sql.to_string(),
            conf_overlay: HashMap::new(),
            run_async: None,
            timeout: None,
        }
    }

    /// Adds a configuration entry sent along with this statement only.
    pub fn conf(mut self, key: &str, value: &str) -> Self {
        self.conf_overlay.insert(key.to_string(), value.to_string());
        self
    }

    /// Overrides whether the server runs the statement in the background.
    ///
    /// Defaults to `true` for [`Statement::query`] and `false` for
    /// [`Statement::exec`].
    pub fn run_async(mut self, run_async: bool) -> Self {
        self.run_async = Some(run_async);
        self
    }

    /// Server-side limit on the statement's run time, in whole seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn query(self) -> Result<RowSet, HiveError> {
        let run_async = self.run_async.unwrap_or(true);
        let connection = self.connection;
        let resp = self.submit(run_async).await?;

        let handle = resp.operation_handle.ok_or_else(|| {
            HiveError::Protocol("execute response carries no operation handle".to_string())
        })?;

        Ok(connection.cursor(handle))
    }

    pub async fn exec(self) -> Result<tcli::TExecuteStatementResp, HiveError> {
        let run_async = self.run_async.unwrap_or(false);
        self.submit(run_async).await
    }

    async fn submit(self, run_async: bool) -> Result<tcli::TExecuteStatementResp, HiveError> {
        let query_timeout = self
            .timeout
            .map(|timeout| i64::try_from(timeout.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0);

        self.connection
            .execute(&self.sql, self.conf_overlay, run_async, query_timeout)
            .await
    }
}
