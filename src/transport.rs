use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::FormFields;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("form endpoint answered with status {0}")]
    Status(u16),
}

// Posts allowed submissions to the form's action URL
#[derive(Clone, Debug)]
pub struct HttpForwarder {
    client: reqwest::Client,
    url: String,
}

impl HttpForwarder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub async fn forward(&self, fields: &FormFields) -> Result<(), TransportError> {
        let res = self
            .client
            .post(&self.url)
            .json(fields)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        debug!(url = %self.url, status = status.as_u16(), "submission forwarded");
        Ok(())
    }
}
