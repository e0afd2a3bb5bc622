use std::sync::{Arc, Mutex};

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::NaiveDate;
use shared::{domain::ClientMetadata, error::SigningError, protocol::AgreementSubmission};
use url::Url;

use crate::geometry::SurfacePoint;
use crate::record::{AgreementDraft, AgreementRecord};
use crate::signature::SignaturePad;
use crate::submit::{submit_agreement, WebhookTransport};

fn sample_record() -> AgreementRecord {
    let mut pad = SignaturePad::new(200.0, 80.0, 1.0);
    pad.pointer_down(SurfacePoint::new(20.0, 40.0));
    pad.pointer_move(SurfacePoint::new(160.0, 40.0));
    pad.pointer_up();

    AgreementDraft {
        client_name: "Jane Doe".into(),
        agreement_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        metadata: ClientMetadata {
            company: Some("Acme Ltd".into()),
            ..Default::default()
        },
        signature_png: pad.to_png().expect("png encode"),
    }
    .finalize()
}

#[derive(Clone)]
struct CapturedBody(Arc<Mutex<Option<AgreementSubmission>>>);

async fn accept_hook(
    State(captured): State<CapturedBody>,
    Json(body): Json<AgreementSubmission>,
) -> StatusCode {
    *captured.0.lock().unwrap() = Some(body);
    StatusCode::OK
}

async fn reject_hook() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_hook_server(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock webhook");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock webhook");
    });
    Url::parse(&format!("http://{addr}/hook")).expect("endpoint url")
}

#[tokio::test]
async fn successful_delivery_posts_the_wire_payload() {
    let captured = CapturedBody(Arc::new(Mutex::new(None)));
    let router = Router::new()
        .route("/hook", post(accept_hook))
        .with_state(captured.clone());
    let endpoint = spawn_hook_server(router).await;

    let record = sample_record();
    let transport = WebhookTransport::new(endpoint);
    let submission = submit_agreement(&transport, &record)
        .await
        .expect("submission accepted");

    assert_eq!(submission.client_name, "Jane Doe");

    let delivered = captured.0.lock().unwrap().take().expect("body delivered");
    assert_eq!(delivered.client_name, "Jane Doe");
    assert_eq!(delivered.client_company, "Acme Ltd");
    assert_eq!(delivered.status, "Signed and Submitted");
    assert!(delivered.signature.starts_with("data:image/png;base64,"));
    assert_eq!(
        delivered.pdf_file_name.as_deref(),
        Some("Jane_Doe/2024-03-01.pdf")
    );
}

#[tokio::test]
async fn non_success_status_is_a_rejection() {
    let router = Router::new().route("/hook", post(reject_hook));
    let endpoint = spawn_hook_server(router).await;

    let record = sample_record();
    let transport = WebhookTransport::new(endpoint);
    let err = submit_agreement(&transport, &record)
        .await
        .expect_err("rejection expected");

    match err {
        SigningError::WebhookRejected { status } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let endpoint = Url::parse(&format!("http://{addr}/hook")).expect("endpoint url");
    let record = sample_record();
    let transport = WebhookTransport::new(endpoint);
    let err = submit_agreement(&transport, &record)
        .await
        .expect_err("transport failure expected");

    assert!(matches!(err, SigningError::WebhookTransport(_)));
    assert!(err.is_retryable());
}
