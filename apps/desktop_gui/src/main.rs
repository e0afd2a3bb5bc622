mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::ClientMetadata;
use signing_core::config::{load_settings, metadata_from_query};

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::AgreementApp;

/// Agreement signing desk for Trader Brothers Ltd.
#[derive(Parser, Debug, Default)]
#[command(name = "agreement-desk")]
struct Args {
    /// Override the webhook endpoint the signed agreement is POSTed to.
    #[arg(long)]
    webhook_url: Option<String>,
    /// Launch-link query string, e.g. "company=Acme%20Ltd&contact=Jane%20Doe".
    #[arg(long)]
    link: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    contact: Option<String>,
}

/// Settings file and environment first, then the launch link, then
/// individual flags. Later layers win field by field.
fn effective_metadata(args: &Args, base: ClientMetadata) -> ClientMetadata {
    let mut metadata = base;
    if let Some(link) = &args.link {
        overlay(&mut metadata, metadata_from_query(link));
    }
    overlay(
        &mut metadata,
        ClientMetadata {
            company: args.company.clone(),
            address: args.address.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
            contact: args.contact.clone(),
        },
    );
    metadata
}

fn overlay(base: &mut ClientMetadata, update: ClientMetadata) {
    if update.company.is_some() {
        base.company = update.company;
    }
    if update.address.is_some() {
        base.address = update.address;
    }
    if update.email.is_some() {
        base.email = update.email;
    }
    if update.phone.is_some() {
        base.phone = update.phone;
    }
    if update.contact.is_some() {
        base.contact = update.contact;
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let settings = load_settings();
    let webhook_url = args
        .webhook_url
        .clone()
        .unwrap_or_else(|| settings.webhook_url.clone());
    let metadata = effective_metadata(&args, settings.metadata);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, webhook_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Trader Brothers Agreement")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Trader Brothers Agreement",
        options,
        Box::new(move |_cc| Ok(Box::new(AgreementApp::new(cmd_tx, ui_rx, metadata)))),
    )
}

#[cfg(test)]
mod tests {
    use super::{effective_metadata, Args};
    use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
    use crate::ui::AgreementApp;
    use crossbeam_channel::bounded;
    use shared::domain::{ClientMetadata, WorkflowStage};

    fn app_with_metadata(metadata: ClientMetadata) -> AgreementApp {
        let (cmd_tx, _cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(64);
        AgreementApp::new(cmd_tx, ui_rx, metadata)
    }

    #[test]
    fn link_parameters_override_settings_and_flags_override_link() {
        let args = Args {
            link: Some("company=Link%20Co&email=link%40example.test".into()),
            email: Some("flag@example.test".into()),
            ..Default::default()
        };
        let base = ClientMetadata {
            company: Some("Base Co".into()),
            phone: Some("111".into()),
            ..Default::default()
        };
        let merged = effective_metadata(&args, base);
        assert_eq!(merged.company.as_deref(), Some("Link Co"));
        assert_eq!(merged.email.as_deref(), Some("flag@example.test"));
        assert_eq!(merged.phone.as_deref(), Some("111"));
        assert!(merged.address.is_none());
    }

    #[test]
    fn contact_parameter_prefills_client_name() {
        let app = app_with_metadata(ClientMetadata {
            contact: Some("Jane Doe".into()),
            ..Default::default()
        });
        let (_, _, _, name) = app.state_for_tests();
        assert_eq!(name, "Jane Doe");
    }

    #[test]
    fn pushed_client_update_overwrites_displayed_metadata() {
        let mut app = app_with_metadata(ClientMetadata {
            company: Some("Old Co".into()),
            address: Some("Old Street".into()),
            ..Default::default()
        });
        app.apply_client_update_query("company=New%20Co");
        let (_, _, metadata, _) = app.state_for_tests();
        assert_eq!(metadata.company_display(), "New Co");
        // Fields absent from the update fall back to placeholders.
        assert_eq!(metadata.address_display(), "[CLIENT_ADDRESS]");
    }

    #[test]
    fn accepted_submission_advances_to_thank_you_and_stores_the_record() {
        use chrono::NaiveDate;
        use signing_core::AgreementDraft;

        let mut app = app_with_metadata(ClientMetadata::default());
        app.set_submit_pending(true);
        let record = AgreementDraft {
            client_name: "Jane Doe".into(),
            agreement_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            metadata: ClientMetadata::default(),
            signature_png: vec![1, 2, 3],
        }
        .finalize();
        app.handle_event(UiEvent::SubmissionAccepted {
            record: Box::new(record),
        });

        let (pending, has_record, _, _) = app.state_for_tests();
        assert!(!pending);
        assert!(has_record);
        assert_eq!(app.navigator().active(), WorkflowStage::ThankYou);
    }

    #[test]
    fn failed_submission_restores_the_submit_control_and_stays_put() {
        let mut app = app_with_metadata(ClientMetadata::default());
        app.set_submit_pending(true);
        app.handle_event(UiEvent::SubmissionFailed {
            reason: "webhook rejected submission with status 500".into(),
        });

        let (pending, has_record, _, _) = app.state_for_tests();
        assert!(!pending);
        assert!(!has_record);
        assert_eq!(app.navigator().active(), WorkflowStage::Profile);
    }

    #[test]
    fn classifies_connection_failures_as_transport_errors() {
        let err = UiError::from_message(
            UiErrorContext::Submit,
            "webhook transport failure: connection refused",
        );
        assert_eq!(err.category, UiErrorCategory::Transport);
    }

    #[test]
    fn classifies_missing_record_as_validation() {
        let err = UiError::from_message(
            UiErrorContext::Export,
            "no completed agreement available to export",
        );
        assert_eq!(err.category, UiErrorCategory::Validation);
    }
}
