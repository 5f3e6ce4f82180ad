use crate::adapters::xml;
use crate::config::toml_config::ConnectionConfig;
use crate::domain::model::SoapFault;
use crate::domain::params::RequestParams;
use crate::domain::ports::SoapTransport;
use crate::utils::error::{ReportingError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;

/// Name of the remote reporting API; also the `.asmx` file it is served from.
pub const REPORTING_API: &str = "ReportingApi";

pub const DEFAULT_NAMESPACE: &str = "http://connectwise.com";

/// Integrator credentials sent in every request body.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub company_id: String,
    pub integrator_login_id: String,
    pub integrator_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("company_id", &self.company_id)
            .field("integrator_login_id", &self.integrator_login_id)
            .field("integrator_password", &"***")
            .finish()
    }
}

/// SOAP 1.1 client bound to a single named API endpoint.
#[derive(Debug, Clone)]
pub struct SoapClient {
    client: Client,
    endpoint: String,
    namespace: String,
    credentials: Credentials,
}

impl SoapClient {
    pub fn for_api(config: &ConnectionConfig, api_name: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .map_err(|e| ReportingError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint_url(&config.base_url, api_name),
            namespace: config.namespace().to_string(),
            credentials: config.credentials(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn soap_action(&self, method: &str) -> String {
        format!("\"{}/{}\"", self.namespace.trim_end_matches('/'), method)
    }
}

pub fn endpoint_url(base_url: &str, api_name: &str) -> String {
    format!("{}/{}.asmx", base_url.trim_end_matches('/'), api_name)
}

fn http_fault(status: StatusCode) -> SoapFault {
    SoapFault {
        code: Some("HTTP".to_string()),
        message: format!("HTTP {}", status),
    }
}

#[async_trait]
impl SoapTransport for SoapClient {
    async fn call(
        &self,
        method: &str,
        params: &RequestParams,
    ) -> std::result::Result<serde_json::Value, SoapFault> {
        let envelope = xml::build_envelope(&self.namespace, method, &self.credentials, params);

        tracing::debug!(
            method,
            endpoint = %self.endpoint,
            params = params.len(),
            "Sending SOAP request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", self.soap_action(method))
            .body(envelope)
            .send()
            .await
            .map_err(|e| SoapFault::new(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SoapFault::new(e.to_string()))?;

        tracing::debug!(method, %status, bytes = body.len(), "SOAP response received");

        let document = xml::parse_document(&body);

        // 伺服器錯誤時優先回傳 SOAP fault 內容
        if !status.is_success() {
            return Err(document
                .ok()
                .as_ref()
                .and_then(xml::find_fault)
                .unwrap_or_else(|| http_fault(status)));
        }

        xml::extract_response(&document?, method)
    }
}
