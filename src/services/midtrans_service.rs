use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;

use crate::{
    config::MidtransConfig,
    error::{AppError, Result},
    models::ChargeRequest,
};

// 407 is an expired transaction, a valid status answer.
const STATUS_CODE_EXPIRED: u64 = 407;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<Value>;

    async fn check(&self, order_id: &str) -> Result<Value>;
}

#[derive(Clone)]
pub struct MidtransClient {
    http: Client,
    base_url: Url,
    server_key: String,
}

impl MidtransClient {
    pub fn new(config: &MidtransConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(config.environment.base_url())
            .map_err(|e| AppError::ConfigError(format!("Invalid Midtrans base URL: {}", e)))?;

        tracing::info!("Midtrans client initialized for {:?}", config.environment);

        Ok(Self {
            http,
            base_url,
            server_key: config.server_key.clone(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid Midtrans base URL: {}", e)))?;
        Ok(self)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::ConfigError("Midtrans base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_response(response: Response) -> Result<Value> {
        let status = response.status();

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to parse Midtrans response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::PaymentError(format!(
                "Midtrans returned HTTP {}: {}",
                status, body
            )));
        }

        if let Some(code) = body_status_code(&body) {
            if code >= 400 && code != STATUS_CODE_EXPIRED {
                let message = body
                    .get("status_message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown Midtrans error");
                return Err(AppError::PaymentError(format!(
                    "Midtrans status {}: {}",
                    code, message
                )));
            }
        }

        Ok(body)
    }
}

fn body_status_code(body: &Value) -> Option<u64> {
    match body.get("status_code")? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

#[async_trait]
impl PaymentGateway for MidtransClient {
    async fn charge(&self, request: &ChargeRequest) -> Result<Value> {
        let url = self.endpoint(&["v2", "charge"])?;

        tracing::info!(
            "Midtrans charge: order_id={}, gross_amount={}",
            request.transaction_details.order_id,
            request.transaction_details.gross_amount
        );

        let response = self
            .http
            .post(url)
            .basic_auth(&self.server_key, Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Midtrans charge request failed: {}", e)))?;

        Self::read_response(response).await
    }

    async fn check(&self, order_id: &str) -> Result<Value> {
        let url = self.endpoint(&["v2", order_id, "status"])?;

        let response = self
            .http
            .get(url)
            .basic_auth(&self.server_key, Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Midtrans status request failed: {}", e)))?;

        Self::read_response(response).await
    }
}
