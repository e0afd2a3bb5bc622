//! Agreement record assembly, separate from layout so the data can be
//! asserted on without invoking the PDF engine.

use chrono::{DateTime, NaiveDate, Utc};
use shared::{
    domain::{ClientMetadata, AGREEMENT_TYPE, SUBMISSION_STATUS},
    error::SigningError,
    protocol::AgreementSubmission,
};
use tracing::warn;

use crate::{contract, pdf, signature::encode_signature_data_url};

/// Everything the contract stage has collected, before rendering. A draft
/// can be finalized more than once (submission, then a later re-export).
#[derive(Debug, Clone)]
pub struct AgreementDraft {
    pub client_name: String,
    pub agreement_date: NaiveDate,
    pub metadata: ClientMetadata,
    pub signature_png: Vec<u8>,
}

impl AgreementDraft {
    /// Render the contract text and PDF and stamp the execution time.
    /// PDF assembly failure is not fatal to the record: the webhook body
    /// and plain-text export remain available without it.
    pub fn finalize(&self) -> AgreementRecord {
        let executed_at = Utc::now();
        let contract_text = contract::render_full_contract(
            &self.client_name,
            self.agreement_date,
            executed_at,
            &self.metadata,
        );
        let pdf_bytes = match pdf::generate_contract_pdf(
            &self.client_name,
            self.agreement_date,
            executed_at,
            &self.metadata,
            &self.signature_png,
        ) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!(error = %err, "pdf assembly failed; submitting without attachment");
                None
            }
        };

        AgreementRecord {
            client_name: self.client_name.clone(),
            agreement_date: self.agreement_date,
            metadata: self.metadata.clone(),
            contract_text,
            signature_png: self.signature_png.clone(),
            pdf_bytes,
            executed_at,
        }
    }
}

/// The finalized bundle built at submission time. Immutable once built;
/// held in memory for the post-submission download action and dropped on
/// workflow restart.
#[derive(Debug, Clone)]
pub struct AgreementRecord {
    pub client_name: String,
    pub agreement_date: NaiveDate,
    pub metadata: ClientMetadata,
    pub contract_text: String,
    pub signature_png: Vec<u8>,
    pub pdf_bytes: Option<Vec<u8>>,
    pub executed_at: DateTime<Utc>,
}

impl AgreementRecord {
    /// Webhook body for this record. Base64 work happens here so the
    /// record itself stays raw bytes.
    pub fn to_submission(&self) -> AgreementSubmission {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        AgreementSubmission {
            client_name: self.client_name.clone(),
            client_company: self.metadata.company_display().to_string(),
            client_email: self.metadata.email_display().to_string(),
            client_phone: self.metadata.phone_display().to_string(),
            client_address: self.metadata.address_display().to_string(),
            signed_date: self.agreement_date,
            submission_timestamp: self.executed_at,
            signed_contract: self.contract_text.clone(),
            signature: encode_signature_data_url(&self.signature_png),
            agreement_type: AGREEMENT_TYPE.to_string(),
            status: SUBMISSION_STATUS.to_string(),
            pdf_attachment: self.pdf_bytes.as_deref().map(|bytes| STANDARD.encode(bytes)),
            pdf_file_name: self.pdf_bytes.is_some().then(|| self.webhook_file_name()),
        }
    }

    /// Attachment name the webhook consumer files under, `<name>/<date>.pdf`.
    pub fn webhook_file_name(&self) -> String {
        format!(
            "{}/{}.pdf",
            sanitize_file_component(&self.client_name),
            self.agreement_date.format("%Y-%m-%d")
        )
    }

    /// Local download name, `TraderBrothers_Agreement_<name>_<date>.<ext>`.
    pub fn download_file_name(&self, extension: &str) -> String {
        download_file_name_for(&self.client_name, self.agreement_date, extension)
    }

    /// Bytes and extension for the client-side export: the generated PDF
    /// when present, else the plain-text contract summary.
    pub fn export_artifact(&self) -> (Vec<u8>, &'static str) {
        match &self.pdf_bytes {
            Some(bytes) => (bytes.clone(), "pdf"),
            None => (self.contract_text.clone().into_bytes(), "txt"),
        }
    }
}

/// Ensure a record exists before an export is attempted.
pub fn require_record(record: Option<&AgreementRecord>) -> Result<&AgreementRecord, SigningError> {
    record.ok_or(SigningError::MissingRecord)
}

/// Download name shared by the record and the regenerate-from-form path.
pub fn download_file_name_for(client_name: &str, date: NaiveDate, extension: &str) -> String {
    format!(
        "TraderBrothers_Agreement_{}_{}.{}",
        sanitize_file_component(client_name),
        date.format("%Y-%m-%d"),
        extension
    )
}

pub fn sanitize_file_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
