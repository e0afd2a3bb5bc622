//! UI/backend events and error modeling for the signing flow.

use std::path::PathBuf;

use signing_core::AgreementRecord;

pub enum UiEvent {
    Info(String),
    SubmissionAccepted { record: Box<AgreementRecord> },
    SubmissionFailed { reason: String },
    ExportCompleted { path: PathBuf },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Document,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    Export,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    pub category: UiErrorCategory,
    pub context: UiErrorContext,
    pub message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("webhook")
            || lower.contains("connection")
            || lower.contains("network")
            || lower.contains("timeout")
            || lower.contains("dns")
            || lower.contains("status")
        {
            UiErrorCategory::Transport
        } else if lower.contains("pdf") || lower.contains("image") || lower.contains("encod") {
            UiErrorCategory::Document
        } else if lower.contains("invalid") || lower.contains("missing") || lower.contains("no completed") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };
        Self {
            category,
            context,
            message,
        }
    }
}

pub fn category_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Document => "Document",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
