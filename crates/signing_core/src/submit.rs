//! One-shot webhook delivery of a finalized agreement.

use async_trait::async_trait;
use reqwest::Client;
use shared::{error::SigningError, protocol::AgreementSubmission};
use tracing::info;
use url::Url;

/// Delivery seam so the pipeline can be driven against a test double or a
/// local mock server instead of the production endpoint.
#[async_trait]
pub trait AgreementTransport: Send + Sync {
    async fn deliver(&self, submission: &AgreementSubmission) -> Result<(), SigningError>;
}

/// Production transport: a single JSON POST. Any 2xx response is success;
/// every other status is a rejection. No retry, and no timeout beyond the
/// transport's own behavior.
pub struct WebhookTransport {
    http: Client,
    endpoint: Url,
}

impl WebhookTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AgreementTransport for WebhookTransport {
    async fn deliver(&self, submission: &AgreementSubmission) -> Result<(), SigningError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(|err| SigningError::WebhookTransport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SigningError::WebhookRejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Build the wire payload from a record and deliver it. The caller commits
/// the record to memory only after this returns `Ok`.
pub async fn submit_agreement(
    transport: &dyn AgreementTransport,
    record: &crate::record::AgreementRecord,
) -> Result<AgreementSubmission, SigningError> {
    let submission = record.to_submission();
    transport.deliver(&submission).await?;
    info!(
        client = %submission.client_name,
        signed_date = %submission.signed_date,
        has_pdf = submission.pdf_attachment.is_some(),
        "agreement submitted"
    );
    Ok(submission)
}
