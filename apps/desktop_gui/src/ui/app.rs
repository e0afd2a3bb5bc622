//! The staged agreement form: profile, contract (with signature canvas),
//! review, and thank-you. One stage is rendered per frame; the signature
//! pad and all derived state live in `signing_core`, this file only wires
//! widgets and the backend bridge.

use chrono::{Local, NaiveDate};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::{Color32, RichText, TextureHandle, TextureOptions};

use shared::domain::{ClientMetadata, WorkflowStage};
use signing_core::{
    config::metadata_from_query,
    contract::{self, TERMS},
    form,
    record::{download_file_name_for, require_record},
    AgreementDraft, AgreementRecord, RawInput, SignaturePad, SurfaceRect, WorkflowNavigator,
};

use crate::backend_bridge::commands::{BackendCommand, ExportSource};
use crate::controller::events::{category_label, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const SUBMIT_LABEL: &str = "Submit Agreement";
const SUBMIT_PENDING_LABEL: &str = "Submitting...";
const CANVAS_HEIGHT: f32 = 200.0;
const CANVAS_MAX_WIDTH: f32 = 560.0;

const ACCENT: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
const GLOW: Color32 = Color32::from_rgb(0x27, 0xae, 0x60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: BannerSeverity,
    message: String,
}

pub struct AgreementApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    navigator: WorkflowNavigator,
    metadata: ClientMetadata,
    client_name: String,
    date_text: String,
    pad: SignaturePad,
    pad_texture: Option<TextureHandle>,
    pad_dirty: bool,
    submit_pending: bool,
    record: Option<AgreementRecord>,
    banner: Option<StatusBanner>,
    dispatch_status: String,
}

impl AgreementApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        metadata: ClientMetadata,
    ) -> Self {
        // The contact field prefills the name input, as the launch link does.
        let client_name = metadata.contact.clone().unwrap_or_default();
        Self {
            cmd_tx,
            ui_rx,
            navigator: WorkflowNavigator::new(),
            metadata,
            client_name,
            date_text: today_iso(),
            pad: SignaturePad::new(CANVAS_MAX_WIDTH, CANVAS_HEIGHT, 1.0),
            pad_texture: None,
            pad_dirty: true,
            submit_pending: false,
            record: None,
            banner: None,
            dispatch_status: String::new(),
        }
    }

    /// Inbound update call: overwrite displayed client details. Fields
    /// absent from the update revert to placeholders.
    pub fn apply_client_update(&mut self, update: ClientMetadata) {
        if self.client_name.is_empty() {
            if let Some(contact) = &update.contact {
                self.client_name = contact.clone();
            }
        }
        self.metadata.apply_update(update);
    }

    /// Same update, but from a percent-encoded query string.
    pub fn apply_client_update_query(&mut self, query: &str) {
        self.apply_client_update(metadata_from_query(query));
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.dispatch_status = message;
            }
            UiEvent::SubmissionAccepted { record } => {
                self.submit_pending = false;
                self.record = Some(*record);
                self.banner = None;
                self.navigator.show(WorkflowStage::ThankYou);
            }
            UiEvent::SubmissionFailed { reason } => {
                // Restore the submit control; no automatic retry.
                self.submit_pending = false;
                self.banner = Some(StatusBanner {
                    severity: BannerSeverity::Error,
                    message: format!(
                        "There was an error submitting your agreement ({reason}). Please try again or contact support."
                    ),
                });
            }
            UiEvent::ExportCompleted { path } => {
                self.banner = Some(StatusBanner {
                    severity: BannerSeverity::Info,
                    message: format!("Agreement saved to {}", path.display()),
                });
            }
            UiEvent::Error(err) => {
                tracing::warn!(context = ?err.context, category = ?err.category, "backend error surfaced");
                self.banner = Some(StatusBanner {
                    severity: BannerSeverity::Error,
                    message: format!("{}: {}", category_label(err.category), err.message),
                });
            }
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_text.trim(), "%Y-%m-%d").ok()
    }

    fn draft(&self) -> Option<AgreementDraft> {
        if !self.pad.has_signature() {
            return None;
        }
        let agreement_date = self.parsed_date()?;
        let signature_png = match self.pad.to_png() {
            Ok(png) => png,
            Err(err) => {
                tracing::warn!(error = %err, "signature export failed");
                return None;
            }
        };
        Some(AgreementDraft {
            client_name: self.client_name.trim().to_string(),
            agreement_date,
            metadata: self.metadata.clone(),
            signature_png,
        })
    }

    fn banner_ui(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = &self.banner {
            let (fill, text) = match banner.severity {
                BannerSeverity::Info => (Color32::from_rgb(0xe8, 0xf5, 0xe9), Color32::BLACK),
                BannerSeverity::Error => (Color32::from_rgb(0xfd, 0xec, 0xea), Color32::DARK_RED),
            };
            egui::Frame::new()
                .fill(fill)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .corner_radius(egui::CornerRadius::same(4))
                .show(ui, |ui| {
                    ui.colored_label(text, &banner.message);
                });
            ui.add_space(8.0);
        }
        if !self.dispatch_status.is_empty() {
            ui.weak(self.dispatch_status.clone());
            ui.add_space(4.0);
        }
    }

    fn profile_stage(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new(contract::COMPANY_NAME).color(ACCENT).size(28.0));
        ui.label(contract::COMPANY_TAGLINE);
        ui.add_space(12.0);
        ui.strong("Client Profile");
        ui.add_space(4.0);

        egui::Grid::new("client-profile").num_columns(2).show(ui, |ui| {
            ui.label("Company:");
            ui.label(self.metadata.company_display());
            ui.end_row();
            ui.label("Address:");
            ui.label(self.metadata.address_display());
            ui.end_row();
            ui.label("Email:");
            ui.label(self.metadata.email_display());
            ui.end_row();
            ui.label("Phone:");
            ui.label(self.metadata.phone_display());
            ui.end_row();
            ui.label("Project Contact:");
            ui.label(self.metadata.contact_display());
            ui.end_row();
        });

        ui.add_space(16.0);
        if ui.button("Begin Agreement").clicked() {
            self.navigator.show(WorkflowStage::Contract);
        }
    }

    fn contract_stage(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new(contract::DOCUMENT_TITLE).color(ACCENT));
        ui.add_space(8.0);

        ui.strong("1. TRADER BROTHERS COMPANY INFORMATION");
        ui.label(contract::COMPANY_INFO_BLOCK);
        ui.add_space(6.0);
        ui.strong("2. CLIENT INFORMATION");
        ui.label(format!(
            "Company: {}\nAddress: {}\nEmail: {}\nPhone: {}\nProject Contact: {}",
            self.metadata.company_display(),
            self.metadata.address_display(),
            self.metadata.email_display(),
            self.metadata.phone_display(),
            self.metadata.contact_display(),
        ));
        ui.add_space(6.0);
        for section in TERMS {
            ui.strong(section.title);
            ui.label(section.body);
            ui.add_space(6.0);
        }

        ui.separator();
        egui::Grid::new("signing-fields").num_columns(2).show(ui, |ui| {
            ui.label("Client Name/Company:");
            ui.text_edit_singleline(&mut self.client_name);
            ui.end_row();
            ui.label("Agreement Date:");
            ui.text_edit_singleline(&mut self.date_text);
            ui.end_row();
        });
        if self.parsed_date().is_none() {
            ui.colored_label(Color32::DARK_RED, "Enter the date as YYYY-MM-DD");
        }
        ui.add_space(8.0);

        ui.label("Signature:");
        self.signature_canvas(ui);
        if ui.button("Clear Signature").clicked() {
            self.pad.clear();
            self.pad_dirty = true;
        }
        ui.add_space(12.0);

        // Recomputed every frame; no hysteresis.
        let gate_open = form::review_enabled(&self.client_name, self.pad.has_signature());
        let ready = gate_open && self.parsed_date().is_some();
        let review_label = if ready {
            RichText::new("Review Agreement").color(Color32::WHITE)
        } else {
            RichText::new("Review Agreement")
        };
        let mut button = egui::Button::new(review_label);
        if ready {
            button = button.fill(GLOW);
        }
        if ui.add_enabled(ready, button).clicked() {
            self.navigator.show(WorkflowStage::Review);
        }
    }

    fn signature_canvas(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width().min(CANVAS_MAX_WIDTH);
        let (response, painter) =
            ui.allocate_painter(egui::vec2(width, CANVAS_HEIGHT), egui::Sense::click_and_drag());
        let rect = response.rect;
        let ratio = ui.ctx().pixels_per_point();

        // Activating this stage raises a deferred refresh request because
        // the surface was zero-sized while hidden; layout drift is caught
        // the same way.
        let refresh = self.navigator.take_surface_refresh();
        if refresh || !self.pad.matches(rect.width(), rect.height(), ratio) {
            self.pad.resize(rect.width(), rect.height(), ratio);
            self.pad_dirty = true;
        }

        let surface = SurfaceRect::new(rect.left(), rect.top(), rect.width(), rect.height());
        let pressed = ui.input(|i| i.pointer.primary_down());
        if let Some(pos) = response.interact_pointer_pos() {
            let raw = RawInput::Pointer {
                client_x: pos.x,
                client_y: pos.y,
            };
            if let Some(point) = raw.surface_position(surface) {
                if !surface.contains(point) {
                    // Leaving the surface ends the stroke, like pointer-out.
                    self.pad.pointer_up();
                } else if pressed && !self.pad.is_drawing() {
                    self.pad.pointer_down(point);
                    self.pad_dirty = true;
                } else if pressed {
                    self.pad.pointer_move(point);
                    self.pad_dirty = true;
                }
            }
        }
        if !pressed && self.pad.is_drawing() {
            self.pad.pointer_up();
        }

        if self.pad_dirty || self.pad_texture.is_none() {
            let (width_px, height_px) = self.pad.pixel_dimensions();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [width_px as usize, height_px as usize],
                self.pad.raw_rgba(),
            );
            match &mut self.pad_texture {
                Some(texture) => texture.set(color_image, TextureOptions::LINEAR),
                None => {
                    self.pad_texture =
                        Some(ui.ctx().load_texture("signature-pad", color_image, TextureOptions::LINEAR));
                }
            }
            self.pad_dirty = false;
        }
        if let Some(texture) = &self.pad_texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_stroke(
            rect,
            egui::CornerRadius::same(2),
            egui::Stroke::new(1.0, Color32::GRAY),
            egui::StrokeKind::Inside,
        );
    }

    fn review_stage(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new("Review & Submit").color(ACCENT));
        ui.add_space(8.0);

        egui::Grid::new("review-summary").num_columns(2).show(ui, |ui| {
            ui.label("Client Name/Company:");
            ui.strong(self.client_name.trim());
            ui.end_row();
            ui.label("Agreement Date:");
            ui.strong(
                self.parsed_date()
                    .map(contract::format_date_uk)
                    .unwrap_or_else(|| self.date_text.clone()),
            );
            ui.end_row();
            ui.label("Agreement Type:");
            ui.strong(shared::domain::AGREEMENT_TYPE);
            ui.end_row();
        });
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.submit_pending, egui::Button::new("Back"))
                .clicked()
            {
                self.navigator.show(WorkflowStage::Contract);
            }

            let label = if self.submit_pending {
                SUBMIT_PENDING_LABEL
            } else {
                SUBMIT_LABEL
            };
            let clicked = ui
                .add_enabled(!self.submit_pending, egui::Button::new(label).fill(GLOW))
                .clicked();
            if clicked {
                self.request_submission();
            }
        });
    }

    fn request_submission(&mut self) {
        let Some(draft) = self.draft() else {
            self.banner = Some(StatusBanner {
                severity: BannerSeverity::Error,
                message: "Complete the name, date, and signature before submitting.".into(),
            });
            return;
        };
        // Disabled until the outcome event arrives; the sole reentrancy
        // guard against double submission.
        self.submit_pending = true;
        self.banner = None;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitAgreement { draft },
            &mut self.dispatch_status,
        );
    }

    fn thank_you_stage(&mut self, ui: &mut egui::Ui) {
        ui.heading(RichText::new("Thank You").color(ACCENT));
        ui.label("Your agreement has been signed and submitted.");
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if ui.button("Download Agreement").clicked() {
                self.request_download();
            }
            if ui.button("Start Over").clicked() {
                self.start_over();
            }
        });
    }

    fn request_download(&mut self) {
        let (source, file_name) = match require_record(self.record.as_ref()) {
            Ok(record) => (
                ExportSource::Record(Box::new(record.clone())),
                record.download_file_name("pdf"),
            ),
            Err(missing) => match self.draft() {
                // No committed record; regenerate from current form state.
                Some(draft) => {
                    let file_name = download_file_name_for(
                        &draft.client_name,
                        draft.agreement_date,
                        "pdf",
                    );
                    (ExportSource::Draft(draft), file_name)
                }
                None => {
                    self.banner = Some(StatusBanner {
                        severity: BannerSeverity::Error,
                        message: missing.to_string(),
                    });
                    return;
                }
            },
        };

        let mut dialog = rfd::FileDialog::new().set_file_name(&file_name);
        if let Some(downloads) = dirs::download_dir() {
            dialog = dialog.set_directory(downloads);
        }
        let Some(destination) = dialog.save_file() else {
            return;
        };
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::ExportAgreement {
                source,
                destination,
            },
            &mut self.dispatch_status,
        );
    }

    fn start_over(&mut self) {
        self.client_name.clear();
        self.date_text = today_iso();
        self.pad.clear();
        self.pad_dirty = true;
        self.record = None;
        self.banner = None;
        self.navigator.show(WorkflowStage::Profile);
    }

    #[cfg(test)]
    pub(crate) fn navigator(&self) -> &WorkflowNavigator {
        &self.navigator
    }

    #[cfg(test)]
    pub(crate) fn state_for_tests(&self) -> (bool, bool, &ClientMetadata, &str) {
        (
            self.submit_pending,
            self.record.is_some(),
            &self.metadata,
            &self.client_name,
        )
    }

    #[cfg(test)]
    pub(crate) fn set_submit_pending(&mut self, pending: bool) {
        self.submit_pending = pending;
    }
}

impl eframe::App for AgreementApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut scroll = egui::ScrollArea::vertical();
            if self.navigator.take_scroll_reset() {
                scroll = scroll.vertical_scroll_offset(0.0);
            }
            scroll.show(ui, |ui| {
                ui.set_max_width(720.0);
                self.banner_ui(ui);
                match self.navigator.active() {
                    WorkflowStage::Profile => self.profile_stage(ui),
                    WorkflowStage::Contract => self.contract_stage(ui),
                    WorkflowStage::Review => self.review_stage(ui),
                    WorkflowStage::ThankYou => self.thank_you_stage(ui),
                }
            });
        });

        // Keep draining promptly while a submission is in flight.
        if self.submit_pending {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
