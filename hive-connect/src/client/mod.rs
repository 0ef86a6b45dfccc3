//! The transport binding consumed by [`Connection`](crate::Connection).
//!
//! [`TcliService`] is the seam between the protocol layer and the wire: one
//! async method per RPC, typed request in, typed response out. The protocol
//! layer never sees sockets or framing, only these calls.
//!
//! [`GrpcTransport`] is the default binding. Anything else (an in-process
//! fake, a recording proxy) can be plugged in through
//! [`Connection::open`](crate::Connection::open).
mod grpc;

pub use self::grpc::GrpcTransport;
use crate::tcli;
use crate::HiveError;

use async_trait::async_trait;


/// Request/response surface of a `TCLIService` endpoint.
///
/// Implementations report call-level failures (the call could not be
/// completed, or its response could not be decoded) as
/// [`HiveError::Protocol`]. Application failures are *not* errors at this
/// level: they arrive inside the response's `status`.
#[async_trait]
pub trait TcliService: Send {
    async fn open_session(
        &mut self,
        req: tcli::TOpenSessionReq,
    ) -> Result<tcli::TOpenSessionResp, HiveError>;

    async fn close_session(
        &mut self,
        req: tcli::TCloseSessionReq,
    ) -> Result<tcli::TCloseSessionResp, HiveError>;

    async fn execute_statement(
        &mut self,
        req: tcli::TExecuteStatementReq,
    ) -> Result<tcli::TExecuteStatementResp, HiveError>;

    async fn get_operation_status(
        &mut self,
        req: tcli::TGetOperationStatusReq,
    ) -> Result<tcli::TGetOperationStatusResp, HiveError>;

    async fn fetch_results(
        &mut self,
        req: tcli::TFetchResultsReq,
    ) -> Result<tcli::TFetchResultsResp, HiveError>;

    async fn get_result_set_metadata(
        &mut self,
        req: tcli::TGetResultSetMetadataReq,
    ) -> Result<tcli::TGetResultSetMetadataResp, HiveError>;
}
