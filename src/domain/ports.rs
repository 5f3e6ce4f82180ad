use crate::domain::model::SoapFault;
use crate::domain::params::RequestParams;
use async_trait::async_trait;

/// A client bound to one remote SOAP API.
///
/// `call` returns the `{method}Response` element of a successful reply as a
/// generic value tree. Every failure (network, HTTP status, malformed XML or
/// an explicit SOAP fault) comes back as a [`SoapFault`].
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        params: &RequestParams,
    ) -> std::result::Result<serde_json::Value, SoapFault>;
}
