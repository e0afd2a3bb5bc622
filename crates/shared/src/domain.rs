use serde::{Deserialize, Serialize};

/// Label attached to every outbound submission.
pub const AGREEMENT_TYPE: &str = "Standard Terms & Conditions of Supply";
/// Fixed status string the webhook consumer keys on.
pub const SUBMISSION_STATUS: &str = "Signed and Submitted";

pub const COMPANY_PLACEHOLDER: &str = "[CLIENT_COMPANY]";
pub const ADDRESS_PLACEHOLDER: &str = "[CLIENT_ADDRESS]";
pub const EMAIL_PLACEHOLDER: &str = "[CLIENT_EMAIL]";
pub const PHONE_PLACEHOLDER: &str = "[CLIENT_PHONE]";
pub const CONTACT_PLACEHOLDER: &str = "[CLIENT_CONTACT]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    Profile,
    Contract,
    Review,
    ThankYou,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 4] = [
        WorkflowStage::Profile,
        WorkflowStage::Contract,
        WorkflowStage::Review,
        WorkflowStage::ThankYou,
    ];
}

/// Client-facing details shown on the agreement, sourced from the launch
/// link or a later push update. Missing fields render as bracketed
/// placeholders rather than empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientMetadata {
    pub company: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact: Option<String>,
}

impl ClientMetadata {
    pub fn company_display(&self) -> &str {
        self.company.as_deref().unwrap_or(COMPANY_PLACEHOLDER)
    }

    pub fn address_display(&self) -> &str {
        self.address.as_deref().unwrap_or(ADDRESS_PLACEHOLDER)
    }

    pub fn email_display(&self) -> &str {
        self.email.as_deref().unwrap_or(EMAIL_PLACEHOLDER)
    }

    pub fn phone_display(&self) -> &str {
        self.phone.as_deref().unwrap_or(PHONE_PLACEHOLDER)
    }

    pub fn contact_display(&self) -> &str {
        self.contact.as_deref().unwrap_or(CONTACT_PLACEHOLDER)
    }

    /// Overwrite displayed values from a pushed update; fields absent from
    /// the update fall back to placeholders, matching the launch behavior.
    pub fn apply_update(&mut self, update: ClientMetadata) {
        *self = update;
    }
}
