use chrono::{NaiveDate, Utc};
use shared::domain::ClientMetadata;

use crate::geometry::SurfacePoint;
use crate::record::{
    require_record, sanitize_file_component, AgreementDraft, AgreementRecord,
};
use crate::signature::SignaturePad;

fn signed_png() -> Vec<u8> {
    let mut pad = SignaturePad::new(200.0, 80.0, 1.0);
    pad.pointer_down(SurfacePoint::new(20.0, 40.0));
    pad.pointer_move(SurfacePoint::new(160.0, 40.0));
    pad.pointer_up();
    pad.to_png().expect("png encode")
}

fn sample_record() -> AgreementRecord {
    AgreementDraft {
        client_name: "Jane Doe".into(),
        agreement_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        metadata: ClientMetadata {
            company: Some("Acme Ltd".into()),
            ..Default::default()
        },
        signature_png: signed_png(),
    }
    .finalize()
}

#[test]
fn sanitizes_non_alphanumeric_characters_to_underscores() {
    assert_eq!(sanitize_file_component("Jane Doe"), "Jane_Doe");
    assert_eq!(sanitize_file_component("O'Brien & Sons"), "O_Brien___Sons");
    assert_eq!(sanitize_file_component("plain123"), "plain123");
}

#[test]
fn download_file_name_matches_expected_format() {
    let record = sample_record();
    assert_eq!(
        record.download_file_name("pdf"),
        "TraderBrothers_Agreement_Jane_Doe_2024-03-01.pdf"
    );
    assert_eq!(
        record.download_file_name("txt"),
        "TraderBrothers_Agreement_Jane_Doe_2024-03-01.txt"
    );
}

#[test]
fn webhook_file_name_slots_under_sanitized_client_name() {
    let record = sample_record();
    assert_eq!(record.webhook_file_name(), "Jane_Doe/2024-03-01.pdf");
}

#[test]
fn finalize_renders_contract_text_and_pdf() {
    let record = sample_record();
    assert!(record.contract_text.contains("Client Name/Company: Jane Doe"));
    assert!(record.contract_text.contains("Company: Acme Ltd"));
    let pdf = record.pdf_bytes.as_deref().expect("pdf generated");
    assert_eq!(&pdf[..5], b"%PDF-");
}

#[test]
fn submission_payload_carries_wire_fields() {
    let record = sample_record();
    let submission = record.to_submission();

    assert_eq!(submission.client_name, "Jane Doe");
    assert_eq!(submission.client_company, "Acme Ltd");
    assert_eq!(submission.client_email, "[CLIENT_EMAIL]");
    assert_eq!(submission.agreement_type, "Standard Terms & Conditions of Supply");
    assert_eq!(submission.status, "Signed and Submitted");
    assert!(submission.signature.starts_with("data:image/png;base64,"));
    assert!(submission.pdf_attachment.is_some());
    assert_eq!(
        submission.pdf_file_name.as_deref(),
        Some("Jane_Doe/2024-03-01.pdf")
    );
}

#[test]
fn submission_serializes_with_camel_case_keys() {
    let record = sample_record();
    let value = serde_json::to_value(record.to_submission()).expect("serialize");
    let object = value.as_object().expect("json object");

    for key in [
        "clientName",
        "clientCompany",
        "clientEmail",
        "clientPhone",
        "clientAddress",
        "signedDate",
        "submissionTimestamp",
        "signedContract",
        "signature",
        "agreementType",
        "status",
        "pdfAttachment",
        "pdfFileName",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert_eq!(object["signedDate"], "2024-03-01");
}

#[test]
fn pdf_attachment_is_omitted_when_assembly_was_skipped() {
    let mut record = sample_record();
    record.pdf_bytes = None;
    let submission = record.to_submission();
    assert!(submission.pdf_attachment.is_none());
    assert!(submission.pdf_file_name.is_none());

    let value = serde_json::to_value(submission).expect("serialize");
    assert!(value.as_object().unwrap().get("pdfAttachment").is_none());
}

#[test]
fn export_artifact_falls_back_to_plain_text_without_pdf() {
    let mut record = sample_record();
    let (bytes, ext) = record.export_artifact();
    assert_eq!(ext, "pdf");
    assert_eq!(&bytes[..5], b"%PDF-");

    record.pdf_bytes = None;
    let (bytes, ext) = record.export_artifact();
    assert_eq!(ext, "txt");
    assert_eq!(bytes, record.contract_text.as_bytes());
}

#[test]
fn export_without_a_record_is_reported_not_silently_skipped() {
    assert!(require_record(None).is_err());
    let record = sample_record();
    assert!(require_record(Some(&record)).is_ok());
}

#[test]
fn execution_timestamp_is_stamped_at_finalize_time() {
    let before = Utc::now();
    let record = sample_record();
    let after = Utc::now();
    assert!(record.executed_at >= before && record.executed_at <= after);
}
