#[cfg(test)]
pub mod test_utils {
    use crate::client::TcliService;
    use crate::tcli::{self, TOperationState, TStatusCode, TTypeId};
    use crate::HiveError;

    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tokio::time::Instant;

    pub const SESSION_GUID: &str = "11111111-1111-1111-1111-111111111111";
    pub const OPERATION_GUID: &str = "22222222-2222-2222-2222-222222222222";

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum CallKind {
        OpenSession,
        CloseSession,
        ExecuteStatement,
        GetOperationStatus,
        FetchResults,
        GetResultSetMetadata,
    }

    #[derive(Clone, Debug)]
    pub struct Call {
        pub kind: CallKind,
        pub at: Instant,
    }

    type Reply<T> = VecDeque<Result<T, HiveError>>;

    #[derive(Default)]
    struct Script {
        calls: Vec<Call>,
        open: Reply<tcli::TOpenSessionResp>,
        close: Reply<tcli::TCloseSessionResp>,
        execute: Reply<tcli::TExecuteStatementResp>,
        status: Reply<tcli::TGetOperationStatusResp>,
        fetch: Reply<tcli::TFetchResultsResp>,
        metadata: Reply<tcli::TGetResultSetMetadataResp>,
        open_requests: Vec<tcli::TOpenSessionReq>,
        execute_requests: Vec<tcli::TExecuteStatementReq>,
        fetch_requests: Vec<tcli::TFetchResultsReq>,
    }

    /// Scripted `TCLIService`: replies are queued per RPC and every call is
    /// recorded with the (possibly paused) tokio clock.
    ///
    /// Clones share the same script, so a test keeps one handle while the
    /// connection owns another.
    #[derive(Clone, Default)]
    pub struct MockService {
        script: Arc<Mutex<Script>>,
    }

    impl MockService {
        fn script(&self) -> MutexGuard<'_, Script> {
            self.script.lock().unwrap()
        }

        pub fn push_open(&self, reply: Result<tcli::TOpenSessionResp, HiveError>) {
            self.script().open.push_back(reply);
        }

        pub fn push_close(&self, reply: Result<tcli::TCloseSessionResp, HiveError>) {
            self.script().close.push_back(reply);
        }

        pub fn push_execute(&self, reply: Result<tcli::TExecuteStatementResp, HiveError>) {
            self.script().execute.push_back(reply);
        }

        pub fn push_status(&self, reply: Result<tcli::TGetOperationStatusResp, HiveError>) {
            self.script().status.push_back(reply);
        }

        pub fn push_fetch(&self, reply: Result<tcli::TFetchResultsResp, HiveError>) {
            self.script().fetch.push_back(reply);
        }

        pub fn push_metadata(&self, reply: Result<tcli::TGetResultSetMetadataResp, HiveError>) {
            self.script().metadata.push_back(reply);
        }

        pub fn calls(&self) -> Vec<Call> {
            self.script().calls.clone()
        }

        pub fn count(&self, kind: CallKind) -> usize {
            self.times(kind).len()
        }

        pub fn times(&self, kind: CallKind) -> Vec<Instant> {
            self.script()
                .calls
                .iter()
                .filter(|call| call.kind == kind)
                .map(|call| call.at)
                .collect()
        }

        pub fn last_open_request(&self) -> Option<tcli::TOpenSessionReq> {
            self.script().open_requests.last().cloned()
        }

        pub fn last_execute_request(&self) -> Option<tcli::TExecuteStatementReq> {
            self.script().execute_requests.last().cloned()
        }

        pub fn last_fetch_request(&self) -> Option<tcli::TFetchResultsReq> {
            self.script().fetch_requests.last().cloned()
        }
    }

    fn reply<T>(kind: CallKind, script: &mut Script, queue: fn(&mut Script) -> &mut Reply<T>) -> Result<T, HiveError> {
        script.calls.push(Call { kind, at: Instant::now() });
        queue(script)
            .pop_front()
            .unwrap_or_else(|| Err(HiveError::Protocol(format!("no scripted reply for {:?}", kind))))
    }

    #[async_trait]
    impl TcliService for MockService {
        async fn open_session(
            &mut self,
            req: tcli::TOpenSessionReq,
        ) -> Result<tcli::TOpenSessionResp, HiveError> {
            let mut script = self.script();
            script.open_requests.push(req);
            reply(CallKind::OpenSession, &mut script, |s| &mut s.open)
        }

        async fn close_session(
            &mut self,
            _req: tcli::TCloseSessionReq,
        ) -> Result<tcli::TCloseSessionResp, HiveError> {
            reply(CallKind::CloseSession, &mut self.script(), |s| &mut s.close)
        }

        async fn execute_statement(
            &mut self,
            req: tcli::TExecuteStatementReq,
        ) -> Result<tcli::TExecuteStatementResp, HiveError> {
            let mut script = self.script();
            script.execute_requests.push(req);
            reply(CallKind::ExecuteStatement, &mut script, |s| &mut s.execute)
        }

        async fn get_operation_status(
            &mut self,
            _req: tcli::TGetOperationStatusReq,
        ) -> Result<tcli::TGetOperationStatusResp, HiveError> {
            reply(CallKind::GetOperationStatus, &mut self.script(), |s| &mut s.status)
        }

        async fn fetch_results(
            &mut self,
            req: tcli::TFetchResultsReq,
        ) -> Result<tcli::TFetchResultsResp, HiveError> {
            let mut script = self.script();
            script.fetch_requests.push(req);
            reply(CallKind::FetchResults, &mut script, |s| &mut s.fetch)
        }

        async fn get_result_set_metadata(
            &mut self,
            _req: tcli::TGetResultSetMetadataReq,
        ) -> Result<tcli::TGetResultSetMetadataResp, HiveError> {
            reply(CallKind::GetResultSetMetadata, &mut self.script(), |s| &mut s.metadata)
        }
    }

    pub fn success() -> tcli::TStatus {
        tcli::TStatus {
            status_code: TStatusCode::SuccessStatus.into(),
            ..Default::default()
        }
    }

    pub fn error_status(message: &str) -> tcli::TStatus {
        tcli::TStatus {
            status_code: TStatusCode::ErrorStatus.into(),
            error_message: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn guid(byte: u8) -> tcli::THandleIdentifier {
        tcli::THandleIdentifier {
            guid: vec![byte; 16],
            secret: vec![0; 16],
        }
    }

    pub fn opened() -> tcli::TOpenSessionResp {
        tcli::TOpenSessionResp {
            status: Some(success()),
            server_protocol_version: tcli::CLIENT_PROTOCOL.into(),
            session_handle: Some(tcli::TSessionHandle {
                session_id: Some(guid(0x11)),
            }),
            configuration: Default::default(),
        }
    }

    pub fn closed() -> tcli::TCloseSessionResp {
        tcli::TCloseSessionResp {
            status: Some(success()),
        }
    }

    pub fn executed(has_result_set: bool) -> tcli::TExecuteStatementResp {
        tcli::TExecuteStatementResp {
            status: Some(success()),
            operation_handle: Some(tcli::TOperationHandle {
                operation_id: Some(guid(0x22)),
                operation_type: tcli::TOperationType::ExecuteStatement.into(),
                has_result_set,
                modified_row_count: None,
            }),
        }
    }

    pub fn raw_state(state: i32) -> tcli::TGetOperationStatusResp {
        tcli::TGetOperationStatusResp {
            status: Some(success()),
            operation_state: Some(state),
            ..Default::default()
        }
    }

    pub fn state(state: TOperationState) -> tcli::TGetOperationStatusResp {
        raw_state(state.into())
    }

    /// A single-column `BIGINT` page.
    pub fn page(values: &[i64], has_more_rows: bool) -> tcli::TFetchResultsResp {
        tcli::TFetchResultsResp {
            status: Some(success()),
            has_more_rows,
            results: Some(tcli::TRowSet {
                start_row_offset: 0,
                rows: vec![],
                columns: vec![tcli::TColumn {
                    values: Some(tcli::t_column::Values::I64Val(tcli::TI64Column {
                        values: values.to_vec(),
                        nulls: vec![],
                    })),
                }],
            }),
        }
    }

    pub fn metadata(columns: &[(&str, TTypeId)]) -> tcli::TGetResultSetMetadataResp {
        tcli::TGetResultSetMetadataResp {
            status: Some(success()),
            schema: Some(tcli::TTableSchema {
                columns: columns
                    .iter()
                    .enumerate()
                    .map(|(index, (name, type_id))| tcli::TColumnDesc {
                        column_name: name.to_string(),
                        type_id: (*type_id).into(),
                        position: index as i32 + 1,
                        comment: None,
                    })
                    .collect(),
            }),
        }
    }
}
