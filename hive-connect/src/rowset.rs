//! Result cursor over a submitted operation.
//!
//! A [`RowSet`] walks through the following states:
//!
//! ```text
//! Created -> Polling -> Ready -> Fetching <-> Ready -> Exhausted
//!               |                   |
//!               +------> Failed <---+
//! ```
//!
//! No result is fetched before the server reports the operation finished.
//! Between two status polls the cursor sleeps for the connection's poll
//! interval; that sleep is the only place it waits. Once a fetch reports no
//! more rows, the cursor never issues another fetch. Once it has failed, it
//! returns the same error forever without touching the wire.
use crate::io;
use crate::session::SharedBinding;
use crate::status::{self, OperationStatus};
use crate::tcli;
use crate::value::{Page, Row};
use crate::{HiveError, Options};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use std::sync::Arc;
use tracing::{debug, warn};


/// Where a [`RowSet`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// No RPC issued yet.
    Created,
    /// Waiting for the operation to reach a terminal state.
    Polling,
    /// The operation finished; rows are buffered or may be fetched.
    Ready,
    /// A fetch is in flight.
    Fetching,
    /// Every row has been handed out.
    Exhausted,
    /// A poll or fetch failed; the error is kept and repeated.
    Failed,
}

/// Cursor over the results of one operation.
///
/// Created by [`Connection::query`](crate::Connection::query). Rows are
/// fetched lazily in pages of at most the connection's batch size.
pub struct RowSet {
    binding: SharedBinding,
    options: Arc<Options>,
    handle: tcli::TOperationHandle,
    operation_id: String,

    state: CursorState,
    failure: Option<HiveError>,

    page: Page,
    position: usize,
    has_more_rows: bool,
    schema: Option<SchemaRef>,
}

impl std::fmt::Debug for RowSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowSet")
            .field("operation_id", &self.operation_id)
            .field("state", &self.state)
            .field("buffered", &(self.page.len() - self.position))
            .field("has_more_rows", &self.has_more_rows)
            .finish()
    }
}

impl RowSet {
    pub(crate) fn new(
        binding: SharedBinding,
        options: Arc<Options>,
        handle: tcli::TOperationHandle,
    ) -> Self {
        let operation_id = handle
            .operation_id
            .as_ref()
            .map(|id| id.guid_string())
            .unwrap_or_default();
        Self {
            binding,
            options,
            handle,
            operation_id,
            state: CursorState::Created,
            failure: None,
            page: Page::default(),
            position: 0,
            // Only a fetched page can say the results are over.
            has_more_rows: true,
            schema: None,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// The server handle of the operation behind this cursor.
    pub fn handle(&self) -> &tcli::TOperationHandle {
        &self.handle
    }

    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Issues a single status poll without waiting.
    ///
    /// Returns [`OperationStatus::Finished`] without an RPC once the
    /// operation is known to be complete. A failed, canceled, timed out or
    /// vanished operation moves the cursor to [`CursorState::Failed`].
    pub async fn poll(&mut self) -> Result<OperationStatus, HiveError> {
        match self.state {
            CursorState::Failed => return Err(self.failure()),
            CursorState::Created | CursorState::Polling => {}
            CursorState::Ready | CursorState::Fetching | CursorState::Exhausted => {
                return Ok(OperationStatus::Finished);
            }
        }

        self.state = CursorState::Polling;
        match self.poll_once().await {
            Ok(OperationStatus::Finished) => {
                self.state = CursorState::Ready;
                Ok(OperationStatus::Finished)
            }
            Ok(status) => Ok(status),
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Polls until the operation reaches a terminal state, sleeping for the
    /// poll interval between two polls. There is no overall deadline.
    pub async fn wait(&mut self) -> Result<(), HiveError> {
        loop {
            if self.poll().await?.is_terminal() {
                return Ok(());
            }
            tokio::time::sleep(self.options.poll_interval()).await;
        }
    }

    /// Returns the next row, or `None` once the results are exhausted.
    pub async fn next(&mut self) -> Result<Option<Row>, HiveError> {
        if !self.fill().await? {
            return Ok(None);
        }

        let row = self.page.row(self.position);
        self.position += 1;
        Ok(Some(row))
    }

    /// Returns the rows left in the current page, fetching a new page if the
    /// buffer is empty. `None` once the results are exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Row>>, HiveError> {
        if !self.fill().await? {
            return Ok(None);
        }

        let rows = self.buffered();
        self.position = self.page.len();
        Ok(Some(rows))
    }

    /// Like [`RowSet::next_page`], as an Arrow batch typed by [`RowSet::schema`].
    ///
    /// Rows that do not fit the schema are not consumed: the error is
    /// returned and the same rows remain readable through the other methods.
    pub async fn next_batch(&mut self) -> Result<Option<RecordBatch>, HiveError> {
        let schema = self.schema().await?;

        if !self.fill().await? {
            return Ok(None);
        }

        let batch = io::to_record_batch(&self.buffered(), &schema)?;
        self.position = self.page.len();
        Ok(Some(batch))
    }

    /// Drains every remaining row.
    pub async fn collect(&mut self) -> Result<Vec<Row>, HiveError> {
        let mut rows = Vec::new();
        while let Some(page) = self.next_page().await? {
            rows.extend(page);
        }
        Ok(rows)
    }

    /// Column layout of the result, requested from the server once after
    /// the operation finished.
    ///
    /// A failed metadata call is returned to the caller but leaves the
    /// cursor usable.
    pub async fn schema(&mut self) -> Result<SchemaRef, HiveError> {
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }

        self.wait().await?;

        let resp = {
            let mut binding = self.binding.lock().await;
            let (service, _) = binding.open_service()?;
            let req = tcli::TGetResultSetMetadataReq {
                operation_handle: Some(self.handle.clone()),
            };
            service.get_result_set_metadata(req).await?
        };
        status::check(resp.status.as_ref(), self.options.strict_read())?;

        let table = resp.schema.ok_or_else(|| {
            HiveError::Protocol("metadata response carries no schema".to_string())
        })?;
        let schema = io::to_schema(&table);

        self.schema = Some(schema.clone());
        Ok(schema)
    }

    fn buffered(&self) -> Vec<Row> {
        (self.position..self.page.len())
            .map(|index| self.page.row(index))
            .collect()
    }

    /// Makes sure a row is buffered. `false` means the results are exhausted.
    async fn fill(&mut self) -> Result<bool, HiveError> {
        self.wait().await?;

        loop {
            if self.position < self.page.len() {
                return Ok(true);
            }
            if self.state == CursorState::Exhausted {
                return Ok(false);
            }
            if !self.has_more_rows {
                debug!(operation_id = %self.operation_id, "Results exhausted");
                self.state = CursorState::Exhausted;
                return Ok(false);
            }
            self.fetch().await?;
        }
    }

    async fn fetch(&mut self) -> Result<(), HiveError> {
        self.state = CursorState::Fetching;

        match self.fetch_once().await {
            Ok(resp) => {
                self.page = Page::new(resp.results.unwrap_or_default());
                self.position = 0;
                self.has_more_rows = resp.has_more_rows;
                self.state = CursorState::Ready;

                debug!(
                    operation_id = %self.operation_id,
                    rows = self.page.len(),
                    has_more_rows = self.has_more_rows,
                    "Fetched page"
                );
                Ok(())
            }
            Err(error) => Err(self.fail(error)),
        }
    }

    async fn fetch_once(&mut self) -> Result<tcli::TFetchResultsResp, HiveError> {
        let resp = {
            let mut binding = self.binding.lock().await;
            let (service, _) = binding.open_service()?;
            let req = tcli::TFetchResultsReq {
                operation_handle: Some(self.handle.clone()),
                orientation: tcli::TFetchOrientation::FetchNext.into(),
                max_rows: self.options.batch_size,
                fetch_type: 0,
            };
            service.fetch_results(req).await?
        };
        status::check(resp.status.as_ref(), self.options.strict_read())?;

        Ok(resp)
    }

    async fn poll_once(&mut self) -> Result<OperationStatus, HiveError> {
        let strict = self.options.strict_read();

        let resp = {
            let mut binding = self.binding.lock().await;
            let (service, _) = binding.open_service()?;
            let req = tcli::TGetOperationStatusReq {
                operation_handle: Some(self.handle.clone()),
            };
            service.get_operation_status(req).await?
        };
        status::check(resp.status.as_ref(), strict)?;

        let operation = OperationStatus::from_wire(resp.operation_state, strict)?;
        debug!(operation_id = %self.operation_id, status = ?operation, "Polled operation");

        match operation {
            OperationStatus::Failed(state) => Err(HiveError::OperationFailed {
                state: state.as_str_name().to_string(),
                message: resp.error_message.unwrap_or_default(),
                sql_state: resp.sql_state,
                error_code: resp.error_code,
            }),
            OperationStatus::Gone(state) => Err(HiveError::OperationGone(format!(
                "operation {} is {}",
                self.operation_id,
                state.as_str_name()
            ))),
            other => Ok(other),
        }
    }

    fn fail(&mut self, error: HiveError) -> HiveError {
        warn!(operation_id = %self.operation_id, error = %error, "Cursor failed");
        self.state = CursorState::Failed;
        self.failure = Some(error.clone());
        error
    }

    fn failure(&self) -> HiveError {
        self.failure
            .clone()
            .unwrap_or_else(|| HiveError::Protocol("cursor failed".to_string()))
    }
}
