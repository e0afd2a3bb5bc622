//! Background worker: owns the tokio runtime and performs webhook
//! delivery and file export off the UI thread.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use signing_core::{submit_agreement, AgreementRecord, WebhookTransport};
use url::Url;

use crate::backend_bridge::commands::{BackendCommand, ExportSource};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, webhook_url: String) {
    thread::spawn(move || {
        let endpoint = match Url::parse(&webhook_url) {
            Ok(url) => url,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("invalid webhook URL '{webhook_url}': {err}"),
                )));
                tracing::error!(%webhook_url, "invalid webhook URL: {err}");
                return;
            }
        };

        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("submission worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build submission runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let transport = WebhookTransport::new(endpoint);
            tracing::info!(endpoint = %transport.endpoint(), "submission worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Submission worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitAgreement { draft } => {
                        let record = draft.finalize();
                        match submit_agreement(&transport, &record).await {
                            Ok(_) => {
                                let _ = ui_tx.try_send(UiEvent::SubmissionAccepted {
                                    record: Box::new(record),
                                });
                            }
                            Err(err) => {
                                tracing::warn!(error = %err, "agreement submission failed");
                                let _ = ui_tx.try_send(UiEvent::SubmissionFailed {
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                    BackendCommand::ExportAgreement {
                        source,
                        destination,
                    } => {
                        let record: AgreementRecord = match source {
                            ExportSource::Record(record) => *record,
                            ExportSource::Draft(draft) => draft.finalize(),
                        };
                        let (bytes, extension) = record.export_artifact();
                        // The draft path cannot know until finalize whether
                        // PDF assembly succeeded, so fix up the extension.
                        let mut path = destination;
                        path.set_extension(extension);
                        match std::fs::write(&path, bytes) {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::ExportCompleted { path });
                            }
                            Err(err) => {
                                tracing::warn!(path = %path.display(), "export failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Export,
                                    format!("could not write '{}': {err}", path.display()),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}
