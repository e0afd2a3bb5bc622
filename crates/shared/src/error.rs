use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("webhook transport failure: {0}")]
    WebhookTransport(String),
    #[error("webhook rejected submission with status {status}")]
    WebhookRejected { status: u16 },
    #[error("pdf assembly failed: {0}")]
    PdfAssembly(String),
    #[error("signature image encoding failed: {0}")]
    SignatureEncoding(String),
    #[error("no completed agreement available to export")]
    MissingRecord,
}

impl SigningError {
    /// Failures that leave the form in a retryable state: the submit
    /// control is restored and the user may resubmit unchanged input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SigningError::WebhookTransport(_) | SigningError::WebhookRejected { .. }
        )
    }
}
