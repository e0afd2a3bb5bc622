//! Backend commands queued from UI to the submission worker.

use std::path::PathBuf;

use signing_core::{AgreementDraft, AgreementRecord};

/// Source material for a client-side export: the record committed at
/// submission time when one exists, else a fresh draft from current form
/// state.
pub enum ExportSource {
    Record(Box<AgreementRecord>),
    Draft(AgreementDraft),
}

pub enum BackendCommand {
    SubmitAgreement { draft: AgreementDraft },
    ExportAgreement {
        source: ExportSource,
        destination: PathBuf,
    },
}
