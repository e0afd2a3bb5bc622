//! UI layer: the staged agreement form and the signature canvas.

pub mod app;

pub use app::AgreementApp;
