//! End-to-end cursor scenarios against an in-process fake server.
use async_trait::async_trait;
use hive_connect::tcli::{self, TOperationState, TStatusCode};
use hive_connect::{Connection, CursorState, HiveError, Options, TcliService, is_success};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rpc {
    Open,
    Close,
    Execute,
    Status,
    Fetch,
    Metadata,
}

type Log = Arc<Mutex<Vec<(Rpc, Instant)>>>;

/// A fake server with one table of names. Each status poll consumes one
/// scripted state; each fetch consumes one scripted page.
struct FakeHive {
    log: Log,
    execute_status: TStatusCode,
    states: VecDeque<TOperationState>,
    pages: VecDeque<Result<(Vec<&'static str>, bool), HiveError>>,
}

impl FakeHive {
    fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            execute_status: TStatusCode::SuccessStatus,
            states: VecDeque::new(),
            pages: VecDeque::new(),
        }
    }

    fn states(mut self, states: &[TOperationState]) -> Self {
        self.states = states.iter().copied().collect();
        self
    }

    fn page(mut self, names: &[&'static str], has_more_rows: bool) -> Self {
        self.pages.push_back(Ok((names.to_vec(), has_more_rows)));
        self
    }

    fn failing_page(mut self, error: HiveError) -> Self {
        self.pages.push_back(Err(error));
        self
    }

    fn record(&self, rpc: Rpc) {
        self.log.lock().unwrap().push((rpc, Instant::now()));
    }
}

fn status(code: TStatusCode) -> Option<tcli::TStatus> {
    Some(tcli::TStatus {
        status_code: code.into(),
        error_message: (!is_success(code)).then(|| "Error while compiling statement".to_string()),
        ..Default::default()
    })
}

fn handle(byte: u8) -> tcli::THandleIdentifier {
    tcli::THandleIdentifier {
        guid: vec![byte; 16],
        secret: vec![byte; 16],
    }
}

fn string_row(name: &str) -> tcli::TRow {
    tcli::TRow {
        col_vals: vec![tcli::TColumnValue {
            value: Some(tcli::t_column_value::Value::StringVal(tcli::TStringValue {
                value: Some(name.to_string()),
            })),
        }],
    }
}

#[async_trait]
impl TcliService for FakeHive {
    async fn open_session(
        &mut self,
        req: tcli::TOpenSessionReq,
    ) -> Result<tcli::TOpenSessionResp, HiveError> {
        self.record(Rpc::Open);
        let authorized = req.username.as_deref() == Some("hive") && req.password.as_deref() == Some("hive");

        Ok(tcli::TOpenSessionResp {
            status: status(if authorized { TStatusCode::SuccessStatus } else { TStatusCode::ErrorStatus }),
            server_protocol_version: req.client_protocol,
            session_handle: authorized.then(|| tcli::TSessionHandle { session_id: Some(handle(1)) }),
            configuration: Default::default(),
        })
    }

    async fn close_session(
        &mut self,
        _req: tcli::TCloseSessionReq,
    ) -> Result<tcli::TCloseSessionResp, HiveError> {
        self.record(Rpc::Close);
        Ok(tcli::TCloseSessionResp { status: status(TStatusCode::SuccessStatus) })
    }

    async fn execute_statement(
        &mut self,
        _req: tcli::TExecuteStatementReq,
    ) -> Result<tcli::TExecuteStatementResp, HiveError> {
        self.record(Rpc::Execute);
        let ok = is_success(self.execute_status);

        Ok(tcli::TExecuteStatementResp {
            status: status(self.execute_status),
            operation_handle: ok.then(|| tcli::TOperationHandle {
                operation_id: Some(handle(2)),
                operation_type: tcli::TOperationType::ExecuteStatement.into(),
                has_result_set: true,
                modified_row_count: None,
            }),
        })
    }

    async fn get_operation_status(
        &mut self,
        _req: tcli::TGetOperationStatusReq,
    ) -> Result<tcli::TGetOperationStatusResp, HiveError> {
        self.record(Rpc::Status);
        let state = self.states.pop_front().unwrap_or(TOperationState::ClosedState);

        Ok(tcli::TGetOperationStatusResp {
            status: status(TStatusCode::SuccessStatus),
            operation_state: Some(state.into()),
            ..Default::default()
        })
    }

    async fn fetch_results(
        &mut self,
        req: tcli::TFetchResultsReq,
    ) -> Result<tcli::TFetchResultsResp, HiveError> {
        self.record(Rpc::Fetch);
        let (names, has_more_rows) = self.pages.pop_front().unwrap_or(Ok((vec![], false)))?;
        assert!(names.len() as i64 <= req.max_rows);

        Ok(tcli::TFetchResultsResp {
            status: status(TStatusCode::SuccessStatus),
            has_more_rows,
            results: Some(tcli::TRowSet {
                start_row_offset: 0,
                rows: names.into_iter().map(string_row).collect(),
                columns: vec![],
            }),
        })
    }

    async fn get_result_set_metadata(
        &mut self,
        _req: tcli::TGetResultSetMetadataReq,
    ) -> Result<tcli::TGetResultSetMetadataResp, HiveError> {
        self.record(Rpc::Metadata);
        Ok(tcli::TGetResultSetMetadataResp {
            status: status(TStatusCode::SuccessStatus),
            schema: Some(tcli::TTableSchema {
                columns: vec![tcli::TColumnDesc {
                    column_name: "name".to_string(),
                    type_id: tcli::TTypeId::StringType.into(),
                    position: 1,
                    comment: None,
                }],
            }),
        })
    }
}

fn rpcs(log: &Log) -> Vec<Rpc> {
    log.lock().unwrap().iter().map(|(rpc, _)| *rpc).collect()
}

fn times(log: &Log, rpc: Rpc) -> Vec<Instant> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|(r, _)| *r == rpc)
        .map(|(_, at)| *at)
        .collect()
}

async fn connect(server: FakeHive, options: Options) -> Connection {
    Connection::open(server, options.with_credentials("hive", "hive"))
        .await
        .unwrap()
}

#[tokio::test]
async fn open_then_close() {
    let log = Log::default();

    let conn = connect(FakeHive::new(&log), Options::default()).await;
    assert!(conn.is_open().await);

    assert!(conn.close().await.is_ok());
    assert!(conn.close().await.is_ok());
    assert_eq!(rpcs(&log), vec![Rpc::Open, Rpc::Close]);
}

#[tokio::test]
async fn rejected_credentials_yield_no_session() {
    let log = Log::default();

    let result = Connection::open(FakeHive::new(&log), Options::default()).await;

    assert!(matches!(result, Err(HiveError::Application { .. })));
}

#[tokio::test]
async fn rejected_statement_yields_no_cursor() {
    let log = Log::default();
    let mut server = FakeHive::new(&log);
    server.execute_status = TStatusCode::ErrorStatus;

    let conn = connect(server, Options::default()).await;

    match conn.query("SELECT 1").await {
        Err(HiveError::Application { status }) => {
            assert!(status.contains("Error while compiling statement"))
        }
        other => panic!("expected an application error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(rpcs(&log), vec![Rpc::Open, Rpc::Execute]);
}

#[tokio::test(start_paused = true)]
async fn running_operation_is_polled_until_finished() {
    let log = Log::default();
    let server = FakeHive::new(&log)
        .states(&[
            TOperationState::RunningState,
            TOperationState::RunningState,
            TOperationState::RunningState,
            TOperationState::FinishedState,
        ])
        .page(&["alice"], false);

    let conn = connect(server, Options::default().with_poll_interval_seconds(3)).await;
    let mut rows = conn.query("SELECT name FROM users").await.unwrap();
    let first = rows.next().await.unwrap().unwrap();

    assert_eq!(first.get::<String>(0).unwrap(), "alice");
    assert_eq!(
        rpcs(&log),
        vec![Rpc::Open, Rpc::Execute, Rpc::Status, Rpc::Status, Rpc::Status, Rpc::Status, Rpc::Fetch]
    );

    let polls = times(&log, Rpc::Status);
    for pair in polls.windows(2) {
        assert_eq!(pair[1].duration_since(pair[0]), Duration::from_secs(3));
    }
}

#[tokio::test]
async fn pages_of_two_two_and_one() {
    let log = Log::default();
    let server = FakeHive::new(&log)
        .states(&[TOperationState::FinishedState])
        .page(&["a", "b"], true)
        .page(&["c", "d"], true)
        .page(&["e"], false);

    let conn = connect(server, Options::default().with_batch_size(2)).await;
    let mut rows = conn.query("SELECT name FROM letters").await.unwrap();

    let mut names = Vec::new();
    while let Some(row) = rows.next().await.unwrap() {
        names.push(row.get::<String>(0).unwrap());
    }

    assert_eq!(names, ["a", "b", "c", "d", "e"]);
    assert_eq!(times(&log, Rpc::Fetch).len(), 3);
    assert_eq!(rows.state(), CursorState::Exhausted);

    assert!(rows.next().await.unwrap().is_none());
    assert_eq!(times(&log, Rpc::Fetch).len(), 3);
    assert_eq!(times(&log, Rpc::Status).len(), 1);
}

#[tokio::test]
async fn failed_fetch_is_reported_once_and_repeated() {
    let log = Log::default();
    let server = FakeHive::new(&log)
        .states(&[TOperationState::FinishedState])
        .page(&["a"], true)
        .failing_page(HiveError::Protocol("transport closed mid-stream".to_string()));

    let conn = connect(server, Options::default()).await;
    let mut rows = conn.query("SELECT name FROM letters").await.unwrap();

    assert!(rows.next().await.unwrap().is_some());
    let err = rows.next().await.unwrap_err();
    assert!(matches!(err, HiveError::Protocol(_)));
    assert_eq!(rows.state(), CursorState::Failed);

    let before = rpcs(&log).len();
    assert_eq!(rows.next().await.unwrap_err(), err);
    assert_eq!(rows.collect().await.unwrap_err(), err);
    assert_eq!(rpcs(&log).len(), before);

    // The session itself is still usable and must be closed by the caller.
    assert!(conn.close().await.is_ok());
}

#[tokio::test]
async fn batches_follow_the_reported_schema() {
    let log = Log::default();
    let server = FakeHive::new(&log)
        .states(&[TOperationState::FinishedState])
        .page(&["x", "y"], false);

    let conn = connect(server, Options::default()).await;
    let mut rows = conn.query("SELECT name FROM letters").await.unwrap();

    let batch = rows.next_batch().await.unwrap().unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.schema().field(0).name(), "name");
    assert!(rows.next_batch().await.unwrap().is_none());
    assert_eq!(times(&log, Rpc::Metadata).len(), 1);
}
