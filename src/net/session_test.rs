use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::json;

use super::*;
use crate::dom::Element;
use crate::notify::{NotificationManager, TOAST_CONTAINER_ID, ToastTiming};

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

fn logout_app(status: StatusCode, body: serde_json::Value) -> Router {
    Router::new().route(
        "/api/auth/logout",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

fn terminator(base_url: &str) -> (Document, SessionTerminator) {
    let doc = Document::at("/dashboard");
    doc.append(None, Element::new(TOAST_CONTAINER_ID, "div")).unwrap();
    let config = UiConfig { api_base_url: base_url.to_owned(), ..UiConfig::default() };
    let toasts = NotificationManager::new(doc.clone(), ToastTiming::default());
    let client = RequestClient::new(&config, toasts).unwrap();
    (doc.clone(), SessionTerminator::new(client, doc, &config))
}

fn toast_messages(terminator: &SessionTerminator) -> Vec<String> {
    terminator
        .client
        .notifications()
        .live()
        .iter()
        .map(|n| n.message().to_owned())
        .collect()
}

#[tokio::test]
async fn confirmed_logout_navigates_to_root() {
    let base = serve(logout_app(StatusCode::OK, json!({"success": true}))).await;
    let (doc, terminator) = terminator(&base);

    assert_eq!(terminator.logout().await, LogoutOutcome::SignedOut);
    assert_eq!(doc.location(), "/");
    assert!(toast_messages(&terminator).is_empty());
}

#[tokio::test]
async fn refused_logout_stays_with_one_toast() {
    let base = serve(logout_app(StatusCode::OK, json!({"success": false}))).await;
    let (doc, terminator) = terminator(&base);

    assert_eq!(terminator.logout().await, LogoutOutcome::Refused);
    assert_eq!(doc.location(), "/dashboard");
    assert_eq!(toast_messages(&terminator), vec!["Erreur lors de la déconnexion"]);
}

#[tokio::test]
async fn refusal_with_error_status_still_reads_the_body() {
    let base = serve(logout_app(StatusCode::FORBIDDEN, json!({"success": false, "error": "csrf"}))).await;
    let (doc, terminator) = terminator(&base);

    assert_eq!(terminator.logout().await, LogoutOutcome::Refused);
    assert_eq!(doc.location(), "/dashboard");
    assert_eq!(toast_messages(&terminator).len(), 1);
}

#[tokio::test]
async fn missing_success_field_counts_as_refusal() {
    let base = serve(logout_app(StatusCode::OK, json!({}))).await;
    let (doc, terminator) = terminator(&base);

    assert_eq!(terminator.logout().await, LogoutOutcome::Refused);
    assert_eq!(doc.location(), "/dashboard");
}

#[tokio::test]
async fn transport_failure_fails_open() {
    let (doc, terminator) = terminator(&dead_base_url().await);

    assert_eq!(terminator.logout().await, LogoutOutcome::FailedOpen);
    assert_eq!(doc.location(), "/");
    assert!(toast_messages(&terminator).is_empty());
}

#[tokio::test]
async fn non_json_answer_fails_open() {
    let app = Router::new().route("/api/auth/logout", post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }));
    let (doc, terminator) = terminator(&serve(app).await);

    assert_eq!(terminator.logout().await, LogoutOutcome::FailedOpen);
    assert_eq!(doc.location(), "/");
}
