use chrono::{NaiveDate, TimeZone, Utc};
use shared::domain::ClientMetadata;

use crate::geometry::SurfacePoint;
use crate::pdf::{generate_contract_pdf, wrap_text};
use crate::signature::SignaturePad;

fn signed_png() -> Vec<u8> {
    let mut pad = SignaturePad::new(200.0, 80.0, 1.0);
    pad.pointer_down(SurfacePoint::new(20.0, 40.0));
    pad.pointer_move(SurfacePoint::new(160.0, 50.0));
    pad.pointer_up();
    pad.to_png().expect("png encode")
}

fn generate(signature: &[u8]) -> Vec<u8> {
    generate_contract_pdf(
        "Jane Doe",
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        &ClientMetadata::default(),
        signature,
    )
    .expect("pdf generation")
}

#[test]
fn produces_a_pdf_document() {
    let bytes = generate(&signed_png());
    assert_eq!(&bytes[..5], b"%PDF-");
    // The full clause text cannot fit one A4 page, so pagination must
    // have produced several.
    assert!(bytes.len() > 4 * 1024);
}

#[test]
fn undecodable_signature_falls_back_to_textual_notice() {
    // Generation must still complete; the raster is replaced by text.
    let bytes = generate(b"not a png at all");
    assert_eq!(&bytes[..5], b"%PDF-");
}

#[test]
fn wrap_keeps_short_text_on_one_line() {
    let lines = wrap_text("Signed by: Jane Doe", 11.0, 190.0);
    assert_eq!(lines, vec!["Signed by: Jane Doe".to_string()]);
}

#[test]
fn wrap_splits_long_paragraphs_within_the_width_budget() {
    let body = "Payment is due within 30 days of invoice date unless otherwise agreed in writing. For projects exceeding five thousand pounds, we may require stage payments as work progresses.";
    let lines = wrap_text(body, 11.0, 190.0);
    assert!(lines.len() > 1);

    let glyph_budget = (190.0 / (11.0 * 0.5 * 0.3528)) as usize;
    for line in &lines {
        assert!(line.chars().count() <= glyph_budget, "overlong line: {line}");
    }
    // No words lost or reordered.
    assert_eq!(lines.join(" "), body);
}

#[test]
fn wrap_honors_paragraph_breaks() {
    let lines = wrap_text("first\n\nsecond", 11.0, 190.0);
    assert_eq!(
        lines,
        vec!["first".to_string(), String::new(), "second".to_string()]
    );
}

#[test]
fn wrap_emits_single_overlong_word_unbroken() {
    let word = "x".repeat(400);
    let lines = wrap_text(&word, 11.0, 190.0);
    assert_eq!(lines, vec![word]);
}
