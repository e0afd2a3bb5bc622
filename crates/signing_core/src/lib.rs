//! GUI-free core of the agreement signing flow: signature capture,
//! workflow staging, record assembly, PDF rendering, and webhook delivery.
//! The desktop shell owns widgets and event plumbing; everything testable
//! lives here.

pub mod config;
pub mod contract;
pub mod form;
pub mod geometry;
pub mod pdf;
pub mod record;
pub mod signature;
pub mod submit;
pub mod workflow;

pub use geometry::{RawInput, SurfacePoint, SurfaceRect, TouchPoint};
pub use record::{AgreementDraft, AgreementRecord};
pub use signature::SignaturePad;
pub use submit::{submit_agreement, AgreementTransport, WebhookTransport};
pub use workflow::WorkflowNavigator;

#[cfg(test)]
mod tests;
