//! Command orchestration helpers from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::SubmitAgreement { .. } => "submit_agreement",
        BackendCommand::ExportAgreement { .. } => "export_agreement",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "A submission is already in progress; please wait".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Submission worker disconnected (possible startup failure); restart the app"
                    .to_string();
        }
    }
}
