// Stripe Checkout integration
// Creates subscription checkout sessions over the form-encoded REST API

use crate::error::{LockboxError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: String,
}

/// Stripe checkout client
pub struct CheckoutClient {
    client: Client,
    secret_key: String,
    price_id: String,
}

impl CheckoutClient {
    pub fn new(secret_key: &str, price_id: &str, timeout_secs: u64) -> Result<Self> {
        if secret_key.is_empty() {
            return Err(LockboxError::Payment(
                "STRIPE_SECRET_KEY not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LockboxError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            secret_key: secret_key.to_string(),
            price_id: price_id.to_string(),
        })
    }

    /// Create a subscription checkout session and return its redirect URL
    pub async fn create_subscription_session(
        &self,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String> {
        let url = format!("{STRIPE_API_BASE}/checkout/sessions");
        debug!("Creating checkout session via {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&[
                ("mode", "subscription"),
                ("line_items[0][price]", self.price_id.as_str()),
                ("line_items[0][quantity]", "1"),
                ("success_url", success_url),
                ("cancel_url", cancel_url),
            ])
            .send()
            .await
            .map_err(|e| LockboxError::Payment(format!("checkout request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LockboxError::Payment(provider_message(status, &body)));
        }

        let session: CheckoutSession = response
            .json()
            .await
            .map_err(|e| LockboxError::Payment(format!("checkout parse failed: {e}")))?;
        Ok(session.url)
    }
}

/// Pull Stripe's human-readable error message out of a failure body,
/// falling back to the raw status when the body is not Stripe-shaped
fn provider_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<StripeErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => {
            format!("checkout error {status}: {}", parsed.error.message)
        }
        _ => format!("checkout error {status}"),
    }
}
