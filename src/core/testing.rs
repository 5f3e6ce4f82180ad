use crate::domain::model::SoapFault;
use crate::domain::params::RequestParams;
use crate::domain::ports::SoapTransport;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory transport that records every call and answers with a canned reply.
#[derive(Clone)]
pub struct RecordingTransport {
    reply: std::result::Result<Value, SoapFault>,
    calls: Arc<Mutex<Vec<(String, RequestParams)>>>,
}

impl RecordingTransport {
    pub fn replying(reply: Value) -> Self {
        Self {
            reply: Ok(reply),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(fault: SoapFault) -> Self {
        Self {
            reply: Err(fault),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn calls(&self) -> Vec<(String, RequestParams)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl SoapTransport for RecordingTransport {
    async fn call(
        &self,
        method: &str,
        params: &RequestParams,
    ) -> std::result::Result<Value, SoapFault> {
        self.calls
            .lock()
            .await
            .push((method.to_string(), params.clone()));
        self.reply.clone()
    }
}
