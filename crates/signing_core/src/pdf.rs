//! PDF rendering of the signed agreement with printpdf.
//!
//! Layout is a single downward cursor with block-at-a-time pagination: a
//! block that would cross the bottom guard starts a new page. Widths are
//! estimated from an average Helvetica glyph width, which is plenty for
//! ragged-right legal text.

use chrono::{DateTime, NaiveDate, Utc};
use image::GenericImageView;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Px, Rgb,
};
use shared::{domain::ClientMetadata, error::SigningError};
use tracing::warn;

use crate::contract::{
    self, COMPANY_INFO_BLOCK, COMPANY_NAME, COMPANY_TAGLINE, DOCUMENT_TITLE, TERMS,
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const TOP_MM: f32 = 20.0;
const BOTTOM_GUARD_MM: f32 = 20.0;
const TEXT_WIDTH_MM: f32 = 190.0;
const SIGNATURE_WIDTH_MM: f32 = 80.0;
const SIGNATURE_HEIGHT_MM: f32 = 30.0;

const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica advance as a fraction of the point size.
const AVG_GLYPH_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontKind {
    Regular,
    Bold,
    Oblique,
}

struct PageComposer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    /// Baseline of the next line, measured down from the page top.
    y_top: f32,
}

impl PageComposer {
    fn new(title: &str) -> Result<Self, SigningError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| SigningError::PdfAssembly(err.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| SigningError::PdfAssembly(err.to_string()))?;
        let oblique = doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|err| SigningError::PdfAssembly(err.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            oblique,
            y_top: TOP_MM,
        })
    }

    fn font(&self, kind: FontKind) -> &IndirectFontRef {
        match kind {
            FontKind::Regular => &self.regular,
            FontKind::Bold => &self.bold,
            FontKind::Oblique => &self.oblique,
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y_top = TOP_MM;
    }

    fn ensure_room(&mut self, needed_mm: f32) {
        if self.y_top + needed_mm > PAGE_HEIGHT_MM - BOTTOM_GUARD_MM {
            self.new_page();
        }
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            None,
        )));
    }

    /// Single line at the current cursor without wrapping; used for the
    /// oversized header where the estimate would wrap too eagerly.
    fn heading(&mut self, text: &str, size_pt: f32, kind: FontKind, advance_mm: f32) {
        self.layer.use_text(
            text,
            size_pt,
            Mm(MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - self.y_top),
            self.font(kind),
        );
        self.y_top += advance_mm;
    }

    /// Wrapped block, paginated as a unit.
    fn block(&mut self, text: &str, size_pt: f32, kind: FontKind) {
        let lines = wrap_text(text, size_pt, TEXT_WIDTH_MM);
        let line_height = size_pt * 0.35;
        self.ensure_room(lines.len() as f32 * line_height);
        let font = self.font(kind).clone();
        for line in &lines {
            self.layer.use_text(
                line,
                size_pt,
                Mm(MARGIN_MM),
                Mm(PAGE_HEIGHT_MM - self.y_top),
                &font,
            );
            self.y_top += line_height;
        }
        self.y_top += 3.0;
    }

    fn space(&mut self, mm: f32) {
        self.y_top += mm;
    }

    /// Embed the signature raster at a fixed physical size. A raster that
    /// fails to decode degrades to a textual notice so generation can
    /// finish; this is the only compensated failure in the pipeline.
    fn signature_image(&mut self, signature_png: &[u8]) {
        if self.y_top > PAGE_HEIGHT_MM - 80.0 {
            self.new_page();
        }
        match image::load_from_memory(signature_png) {
            Ok(decoded) => {
                let (width_px, height_px) = decoded.dimensions();
                let raw_pixels = decoded.to_rgb8().into_raw();
                let xobject = Image::from(ImageXObject {
                    width: Px(width_px as usize),
                    height: Px(height_px as usize),
                    color_space: ColorSpace::Rgb,
                    bits_per_component: ColorBits::Bit8,
                    interpolate: true,
                    image_data: raw_pixels,
                    image_filter: None,
                    clipping_bbox: None,
                    smask: None,
                });
                // dpi = pixels / (target mm / 25.4); width drives the scale
                // and the raster's own aspect is close to 80x30 already.
                let dpi = width_px as f32 / (SIGNATURE_WIDTH_MM / 25.4);
                xobject.add_to_layer(
                    self.layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(MARGIN_MM)),
                        translate_y: Some(Mm(
                            PAGE_HEIGHT_MM - self.y_top - SIGNATURE_HEIGHT_MM
                        )),
                        dpi: Some(dpi),
                        ..Default::default()
                    },
                );
                self.y_top += SIGNATURE_HEIGHT_MM + 5.0;
            }
            Err(err) => {
                warn!(error = %err, "could not embed signature image; using textual notice");
                self.block(
                    "Digital Signature: Provided and Verified",
                    11.0,
                    FontKind::Regular,
                );
            }
        }
    }

    fn finish(self) -> Result<Vec<u8>, SigningError> {
        self.doc
            .save_to_bytes()
            .map_err(|err| SigningError::PdfAssembly(err.to_string()))
    }
}

pub fn generate_contract_pdf(
    client_name: &str,
    agreement_date: NaiveDate,
    executed_at: DateTime<Utc>,
    metadata: &ClientMetadata,
    signature_png: &[u8],
) -> Result<Vec<u8>, SigningError> {
    let mut composer = PageComposer::new(DOCUMENT_TITLE)?;

    composer.set_color(44, 62, 80);
    composer.heading(COMPANY_NAME, 24.0, FontKind::Bold, 8.0);
    composer.set_color(102, 102, 102);
    composer.heading(COMPANY_TAGLINE, 14.0, FontKind::Regular, 10.0);
    composer.set_color(44, 62, 80);
    composer.heading(DOCUMENT_TITLE, 18.0, FontKind::Bold, 10.0);
    composer.set_color(0, 0, 0);

    composer.block("AGREEMENT DETAILS:", 14.0, FontKind::Bold);
    composer.block(
        &format!("Client Name/Company: {client_name}"),
        11.0,
        FontKind::Regular,
    );
    composer.block(
        &format!(
            "Agreement Date: {}",
            contract::format_date_uk(agreement_date)
        ),
        11.0,
        FontKind::Regular,
    );
    composer.block(
        &format!(
            "Execution Time: {}",
            executed_at.format("%d/%m/%Y, %H:%M:%S")
        ),
        11.0,
        FontKind::Regular,
    );
    composer.space(5.0);

    composer.block(
        "1. TRADER BROTHERS COMPANY INFORMATION:",
        12.0,
        FontKind::Bold,
    );
    composer.block(COMPANY_INFO_BLOCK, 11.0, FontKind::Regular);
    composer.space(3.0);

    composer.block("2. CLIENT INFORMATION:", 12.0, FontKind::Bold);
    composer.block(
        &format!(
            "Company: {}\nAddress: {}\nEmail: {}\nPhone: {}\nProject Contact: {}",
            metadata.company_display(),
            metadata.address_display(),
            metadata.email_display(),
            metadata.phone_display(),
            metadata.contact_display(),
        ),
        11.0,
        FontKind::Regular,
    );
    composer.space(3.0);

    for section in TERMS {
        composer.block(section.title, 12.0, FontKind::Bold);
        composer.block(section.body, 11.0, FontKind::Regular);
        composer.space(2.0);
    }

    composer.block("DIGITAL SIGNATURE:", 14.0, FontKind::Bold);
    composer.block(
        "By signing below, the client acknowledges having read, understood, and agreed to be bound by these Terms and Conditions of Supply.",
        11.0,
        FontKind::Regular,
    );
    composer.signature_image(signature_png);

    composer.block(&format!("Signed by: {client_name}"), 11.0, FontKind::Bold);
    composer.block(
        &format!("Date: {}", contract::format_date_uk(agreement_date)),
        11.0,
        FontKind::Regular,
    );
    composer.space(5.0);
    composer.block(
        "This agreement is legally binding upon digital signature.",
        11.0,
        FontKind::Oblique,
    );

    composer.finish()
}

/// Greedy word wrap against an average-glyph width estimate. Paragraph
/// breaks are honored; a single overlong word is emitted unbroken.
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let glyph_width_mm = size_pt * AVG_GLYPH_EM * PT_TO_MM;
    let max_glyphs = (max_width_mm / glyph_width_mm).floor().max(1.0) as usize;

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= max_glyphs {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
