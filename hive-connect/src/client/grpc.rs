use super::TcliService;
use crate::tcli;
use crate::{HiveError, Options};

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};


/// `TCLIService` over gRPC (HTTP/2 on TCP, optionally TLS).
///
/// Owns exactly one channel; it is never shared between connections.
#[derive(Clone, Debug)]
pub struct GrpcTransport {
    inner: Grpc<Channel>,
}

impl GrpcTransport {
    /// Opens a channel to `host_port` using the transport settings in `options`.
    ///
    /// Failing to reach the server is a [`HiveError::Transport`].
    pub async fn connect(host_port: &str, options: &Options) -> Result<Self, HiveError> {
        let endpoint = Endpoint::from_shared(format!("{}://{}", scheme(options), host_port))?
            .connect_timeout(options.connect_timeout)
            .timeout(options.socket_timeout);

        #[cfg(feature = "tls")]
        let endpoint = match &options.tls_config {
            Some(tls_config) => endpoint.tls_config(tls_config.clone())?,
            None => endpoint,
        };

        let channel = endpoint.connect().await?;

        let mut inner = Grpc::new(channel);
        if let Some(limit) = options.max_message_size {
            inner = inner.max_decoding_message_size(limit);
        }
        if let Some(limit) = options.max_frame_size {
            inner = inner.max_encoding_message_size(limit);
        }

        Ok(Self { inner })
    }

    async fn unary<Req, Resp>(&mut self, req: Req, path: &'static str) -> Result<Resp, HiveError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| HiveError::Protocol(format!("Service was not ready: {}", e)))?;

        let codec = tonic_prost::ProstCodec::default();
        let resp = self
            .inner
            .unary(tonic::Request::new(req), PathAndQuery::from_static(path), codec)
            .await?;

        Ok(resp.into_inner())
    }
}

#[cfg(feature = "tls")]
fn scheme(options: &Options) -> &'static str {
    if options.tls_config.is_some() { "https" } else { "http" }
}

#[cfg(not(feature = "tls"))]
fn scheme(_options: &Options) -> &'static str {
    "http"
}

#[async_trait]
impl TcliService for GrpcTransport {
    async fn open_session(
        &mut self,
        req: tcli::TOpenSessionReq,
    ) -> Result<tcli::TOpenSessionResp, HiveError> {
        self.unary(req, "/hive.TCLIService/OpenSession").await
    }

    async fn close_session(
        &mut self,
        req: tcli::TCloseSessionReq,
    ) -> Result<tcli::TCloseSessionResp, HiveError> {
        self.unary(req, "/hive.TCLIService/CloseSession").await
    }

    async fn execute_statement(
        &mut self,
        req: tcli::TExecuteStatementReq,
    ) -> Result<tcli::TExecuteStatementResp, HiveError> {
        self.unary(req, "/hive.TCLIService/ExecuteStatement").await
    }

    async fn get_operation_status(
        &mut self,
        req: tcli::TGetOperationStatusReq,
    ) -> Result<tcli::TGetOperationStatusResp, HiveError> {
        self.unary(req, "/hive.TCLIService/GetOperationStatus").await
    }

    async fn fetch_results(
        &mut self,
        req: tcli::TFetchResultsReq,
    ) -> Result<tcli::TFetchResultsResp, HiveError> {
        self.unary(req, "/hive.TCLIService/FetchResults").await
    }

    async fn get_result_set_metadata(
        &mut self,
        req: tcli::TGetResultSetMetadataReq,
    ) -> Result<tcli::TGetResultSetMetadataResp, HiveError> {
        self.unary(req, "/hive.TCLIService/GetResultSetMetadata").await
    }
}
