//! Wire types of the `TCLIService` RPC surface.
//!
//! These mirror the service's generated request/response structures and are
//! encoded with [prost]. Field tags are part of the wire contract and must not
//! be renumbered.
use std::collections::HashMap;

/// Client protocol version sent on every `OpenSession`.
pub const CLIENT_PROTOCOL: TProtocolVersion = TProtocolVersion::HiveCliServiceProtocolV7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TProtocolVersion {
    HiveCliServiceProtocolV1 = 0,
    HiveCliServiceProtocolV2 = 1,
    HiveCliServiceProtocolV3 = 2,
    HiveCliServiceProtocolV4 = 3,
    HiveCliServiceProtocolV5 = 4,
    HiveCliServiceProtocolV6 = 5,
    HiveCliServiceProtocolV7 = 6,
    HiveCliServiceProtocolV8 = 7,
    HiveCliServiceProtocolV9 = 8,
    HiveCliServiceProtocolV10 = 9,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TStatusCode {
    SuccessStatus = 0,
    SuccessWithInfoStatus = 1,
    StillExecutingStatus = 2,
    ErrorStatus = 3,
    InvalidHandleStatus = 4,
}

impl TStatusCode {
    /// Every status code known to this client.
    pub const ALL: [TStatusCode; 5] = [
        TStatusCode::SuccessStatus,
        TStatusCode::SuccessWithInfoStatus,
        TStatusCode::StillExecutingStatus,
        TStatusCode::ErrorStatus,
        TStatusCode::InvalidHandleStatus,
    ];

    pub fn as_str_name(&self) -> &'static str {
        match self {
            TStatusCode::SuccessStatus => "SUCCESS_STATUS",
            TStatusCode::SuccessWithInfoStatus => "SUCCESS_WITH_INFO_STATUS",
            TStatusCode::StillExecutingStatus => "STILL_EXECUTING_STATUS",
            TStatusCode::ErrorStatus => "ERROR_STATUS",
            TStatusCode::InvalidHandleStatus => "INVALID_HANDLE_STATUS",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TOperationState {
    InitializedState = 0,
    RunningState = 1,
    FinishedState = 2,
    CanceledState = 3,
    ClosedState = 4,
    ErrorState = 5,
    UkState = 6,
    PendingState = 7,
    TimedoutState = 8,
}

impl TOperationState {
    pub const ALL: [TOperationState; 9] = [
        TOperationState::InitializedState,
        TOperationState::RunningState,
        TOperationState::FinishedState,
        TOperationState::CanceledState,
        TOperationState::ClosedState,
        TOperationState::ErrorState,
        TOperationState::UkState,
        TOperationState::PendingState,
        TOperationState::TimedoutState,
    ];

    pub fn as_str_name(&self) -> &'static str {
        match self {
            TOperationState::InitializedState => "INITIALIZED_STATE",
            TOperationState::RunningState => "RUNNING_STATE",
            TOperationState::FinishedState => "FINISHED_STATE",
            TOperationState::CanceledState => "CANCELED_STATE",
            TOperationState::ClosedState => "CLOSED_STATE",
            TOperationState::ErrorState => "ERROR_STATE",
            TOperationState::UkState => "UKNOWN_STATE",
            TOperationState::PendingState => "PENDING_STATE",
            TOperationState::TimedoutState => "TIMEDOUT_STATE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TOperationType {
    ExecuteStatement = 0,
    GetTypeInfo = 1,
    GetCatalogs = 2,
    GetSchemas = 3,
    GetTables = 4,
    GetTableTypes = 5,
    GetColumns = 6,
    GetFunctions = 7,
    Unknown = 8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TFetchOrientation {
    FetchNext = 0,
    FetchPrior = 1,
    FetchRelative = 2,
    FetchAbsolute = 3,
    FetchFirst = 4,
    FetchLast = 5,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TTypeId {
    BooleanType = 0,
    TinyintType = 1,
    SmallintType = 2,
    IntType = 3,
    BigintType = 4,
    FloatType = 5,
    DoubleType = 6,
    StringType = 7,
    TimestampType = 8,
    BinaryType = 9,
    ArrayType = 10,
    MapType = 11,
    StructType = 12,
    UnionType = 13,
    UserDefinedType = 14,
    DecimalType = 15,
    NullType = 16,
    DateType = 17,
    VarcharType = 18,
    CharType = 19,
    IntervalYearMonthType = 20,
    IntervalDayTimeType = 21,
}

/// Application-level status carried by every response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TStatus {
    #[prost(enumeration = "TStatusCode", tag = "1")]
    pub status_code: i32,
    #[prost(string, repeated, tag = "2")]
    pub info_messages: Vec<String>,
    #[prost(string, optional, tag = "3")]
    pub sql_state: Option<String>,
    #[prost(int32, optional, tag = "4")]
    pub error_code: Option<i32>,
    #[prost(string, optional, tag = "5")]
    pub error_message: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct THandleIdentifier {
    #[prost(bytes = "vec", tag = "1")]
    pub guid: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub secret: Vec<u8>,
}

impl THandleIdentifier {
    /// The GUID rendered as a UUID, or as hex when it is not 16 bytes long.
    pub fn guid_string(&self) -> String {
        match uuid::Uuid::from_slice(&self.guid) {
            Ok(uuid) => uuid.to_string(),
            Err(_) => self.guid.iter().map(|b| format!("{:02x}", b)).collect(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TSessionHandle {
    #[prost(message, optional, tag = "1")]
    pub session_id: Option<THandleIdentifier>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TOperationHandle {
    #[prost(message, optional, tag = "1")]
    pub operation_id: Option<THandleIdentifier>,
    #[prost(enumeration = "TOperationType", tag = "2")]
    pub operation_type: i32,
    #[prost(bool, tag = "3")]
    pub has_result_set: bool,
    #[prost(double, optional, tag = "4")]
    pub modified_row_count: Option<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TOpenSessionReq {
    #[prost(enumeration = "TProtocolVersion", tag = "1")]
    pub client_protocol: i32,
    #[prost(string, optional, tag = "2")]
    pub username: Option<String>,
    #[prost(string, optional, tag = "3")]
    pub password: Option<String>,
    #[prost(map = "string, string", tag = "4")]
    pub configuration: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TOpenSessionResp {
    #[prost(message, optional, tag = "1")]
    pub status: Option<TStatus>,
    #[prost(enumeration = "TProtocolVersion", tag = "2")]
    pub server_protocol_version: i32,
    #[prost(message, optional, tag = "3")]
    pub session_handle: Option<TSessionHandle>,
    #[prost(map = "string, string", tag = "4")]
    pub configuration: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TCloseSessionReq {
    #[prost(message, optional, tag = "1")]
    pub session_handle: Option<TSessionHandle>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TCloseSessionResp {
    #[prost(message, optional, tag = "1")]
    pub status: Option<TStatus>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TExecuteStatementReq {
    #[prost(message, optional, tag = "1")]
    pub session_handle: Option<TSessionHandle>,
    #[prost(string, tag = "2")]
    pub statement: String,
    #[prost(map = "string, string", tag = "3")]
    pub conf_overlay: HashMap<String, String>,
    #[prost(bool, tag = "4")]
    pub run_async: bool,
    #[prost(int64, tag = "5")]
    pub query_timeout: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TExecuteStatementResp {
    #[prost(message, optional, tag = "1")]
    pub status: Option<TStatus>,
    #[prost(message, optional, tag = "2")]
    pub operation_handle: Option<TOperationHandle>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TGetOperationStatusReq {
    #[prost(message, optional, tag = "1")]
    pub operation_handle: Option<TOperationHandle>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TGetOperationStatusResp {
    #[prost(message, optional, tag = "1")]
    pub status: Option<TStatus>,
    #[prost(enumeration = "TOperationState", optional, tag = "2")]
    pub operation_state: Option<i32>,
    #[prost(string, optional, tag = "3")]
    pub sql_state: Option<String>,
    #[prost(int32, optional, tag = "4")]
    pub error_code: Option<i32>,
    #[prost(string, optional, tag = "5")]
    pub error_message: Option<String>,
    #[prost(int64, optional, tag = "6")]
    pub operation_started: Option<i64>,
    #[prost(int64, optional, tag = "7")]
    pub operation_completed: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TFetchResultsReq {
    #[prost(message, optional, tag = "1")]
    pub operation_handle: Option<TOperationHandle>,
    #[prost(enumeration = "TFetchOrientation", tag = "2")]
    pub orientation: i32,
    #[prost(int64, tag = "3")]
    pub max_rows: i64,
    #[prost(int32, tag = "4")]
    pub fetch_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TFetchResultsResp {
    #[prost(message, optional, tag = "1")]
    pub status: Option<TStatus>,
    #[prost(bool, tag = "2")]
    pub has_more_rows: bool,
    #[prost(message, optional, tag = "3")]
    pub results: Option<TRowSet>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TGetResultSetMetadataReq {
    #[prost(message, optional, tag = "1")]
    pub operation_handle: Option<TOperationHandle>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TGetResultSetMetadataResp {
    #[prost(message, optional, tag = "1")]
    pub status: Option<TStatus>,
    #[prost(message, optional, tag = "2")]
    pub schema: Option<TTableSchema>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TTableSchema {
    #[prost(message, repeated, tag = "1")]
    pub columns: Vec<TColumnDesc>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TColumnDesc {
    #[prost(string, tag = "1")]
    pub column_name: String,
    #[prost(enumeration = "TTypeId", tag = "2")]
    pub type_id: i32,
    #[prost(int32, tag = "3")]
    pub position: i32,
    #[prost(string, optional, tag = "4")]
    pub comment: Option<String>,
}

/// One page of results. Servers fill either `rows` (row-major) or `columns`
/// (column-major), never both.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TRowSet {
    #[prost(int64, tag = "1")]
    pub start_row_offset: i64,
    #[prost(message, repeated, tag = "2")]
    pub rows: Vec<TRow>,
    #[prost(message, repeated, tag = "3")]
    pub columns: Vec<TColumn>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TRow {
    #[prost(message, repeated, tag = "1")]
    pub col_vals: Vec<TColumnValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TColumnValue {
    #[prost(oneof = "t_column_value::Value", tags = "1, 2, 3, 4, 5, 6, 7")]
    pub value: Option<t_column_value::Value>,
}

pub mod t_column_value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        BoolVal(super::TBoolValue),
        #[prost(message, tag = "2")]
        ByteVal(super::TByteValue),
        #[prost(message, tag = "3")]
        I16Val(super::TI16Value),
        #[prost(message, tag = "4")]
        I32Val(super::TI32Value),
        #[prost(message, tag = "5")]
        I64Val(super::TI64Value),
        #[prost(message, tag = "6")]
        DoubleVal(super::TDoubleValue),
        #[prost(message, tag = "7")]
        StringVal(super::TStringValue),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TBoolValue {
    #[prost(bool, optional, tag = "1")]
    pub value: Option<bool>,
}

/// Byte and i16 values travel as `int32` and are narrowed on read.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TByteValue {
    #[prost(int32, optional, tag = "1")]
    pub value: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TI16Value {
    #[prost(int32, optional, tag = "1")]
    pub value: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TI32Value {
    #[prost(int32, optional, tag = "1")]
    pub value: Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TI64Value {
    #[prost(int64, optional, tag = "1")]
    pub value: Option<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TDoubleValue {
    #[prost(double, optional, tag = "1")]
    pub value: Option<f64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TStringValue {
    #[prost(string, optional, tag = "1")]
    pub value: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TColumn {
    #[prost(oneof = "t_column::Values", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub values: Option<t_column::Values>,
}

pub mod t_column {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Values {
        #[prost(message, tag = "1")]
        BoolVal(super::TBoolColumn),
        #[prost(message, tag = "2")]
        ByteVal(super::TByteColumn),
        #[prost(message, tag = "3")]
        I16Val(super::TI16Column),
        #[prost(message, tag = "4")]
        I32Val(super::TI32Column),
        #[prost(message, tag = "5")]
        I64Val(super::TI64Column),
        #[prost(message, tag = "6")]
        DoubleVal(super::TDoubleColumn),
        #[prost(message, tag = "7")]
        StringVal(super::TStringColumn),
        #[prost(message, tag = "8")]
        BinaryVal(super::TBinaryColumn),
    }
}

// Column-major pages: `nulls` is a bitmap, bit `i % 8` of byte `i / 8` set
// when row `i` is null.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TBoolColumn {
    #[prost(bool, repeated, tag = "1")]
    pub values: Vec<bool>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TByteColumn {
    #[prost(int32, repeated, tag = "1")]
    pub values: Vec<i32>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TI16Column {
    #[prost(int32, repeated, tag = "1")]
    pub values: Vec<i32>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TI32Column {
    #[prost(int32, repeated, tag = "1")]
    pub values: Vec<i32>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TI64Column {
    #[prost(int64, repeated, tag = "1")]
    pub values: Vec<i64>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TDoubleColumn {
    #[prost(double, repeated, tag = "1")]
    pub values: Vec<f64>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TStringColumn {
    #[prost(string, repeated, tag = "1")]
    pub values: Vec<String>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TBinaryColumn {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub values: Vec<Vec<u8>>,
    #[prost(bytes = "vec", tag = "2")]
    pub nulls: Vec<u8>,
}
