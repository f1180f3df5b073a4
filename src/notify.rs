use serde::Serialize;
use tracing::{debug, warn};

#[derive(Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Posts launch progress to the configured notifications webhook.
///
/// Delivery is best effort: failures are logged and never reach the caller, so a
/// broken webhook cannot change the outcome of a launch.
pub struct Notifier {
    http: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url,
        }
    }

    pub async fn notify(&self, text: &str) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let result = self
            .http
            .post(url)
            .json(&WebhookMessage { text })
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => debug!(%url, "Sent webhook notification"),
            Err(e) => warn!(%url, error = %e, "Failed to send webhook notification"),
        }
    }
}
