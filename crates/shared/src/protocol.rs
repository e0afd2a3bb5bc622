use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Outbound webhook body. Field names follow the consumer's existing
/// camelCase contract, so this struct is the wire format, not a view of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementSubmission {
    pub client_name: String,
    pub client_company: String,
    pub client_email: String,
    pub client_phone: String,
    pub client_address: String,
    pub signed_date: NaiveDate,
    pub submission_timestamp: DateTime<Utc>,
    pub signed_contract: String,
    /// Signature raster as a `data:image/png;base64,...` URL.
    pub signature: String,
    pub agreement_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file_name: Option<String>,
}
