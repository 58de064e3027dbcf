mod common;

use axum::http::{Method, StatusCode};
use common::{empty_request, json_request, memory_app, send, SURVEY_FORM};
use form_service::services::FormStore;
use mongodb::bson::oid::ObjectId;
use serde_json::json;

#[tokio::test]
async fn survey_round_trip() {
    let (app, _store) = memory_app();

    let (status, body) = send(&app, json_request(Method::POST, "/api/forms", SURVEY_FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Form Submitted Successfully");
    assert_eq!(body["data"]["title"], "Survey");
    assert_eq!(body["data"]["fields"][0]["value"], "Alice");
    let id = body["data"]["_id"].as_str().unwrap().to_string();
    assert!(ObjectId::parse_str(&id).is_ok());

    let (status, listed) = send(&app, empty_request(Method::GET, "/api/forms")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], body["data"]);

    let (status, deleted) = send(
        &app,
        empty_request(Method::DELETE, &format!("/api/forms/{}", id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "Form Deleted Successfully" }));

    let (_, listed) = send(&app, empty_request(Method::GET, "/api/forms")).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn submitted_fields_are_returned_unchanged() {
    let (app, _store) = memory_app();
    let submitted = json!({
        "title": "Preferences",
        "fields": [
            {
                "id": "colour",
                "type": "checkbox",
                "label": "Favourite colours",
                "options": ["red", "green", "blue"],
                "selectedOptions": [0, 2],
                "value": ""
            },
            {
                "id": "note",
                "type": "textarea",
                "label": "Anything else?",
                "options": [],
                "selectedOptions": [],
                "value": "no"
            }
        ]
    });

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/forms", submitted.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let mut data = body["data"].clone();
    data.as_object_mut().unwrap().remove("_id");
    assert_eq!(data, submitted);
}

#[tokio::test]
async fn empty_fields_round_trip_as_empty_list() {
    let (app, _store) = memory_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/forms", r#"{"title":"Blank","fields":[]}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fields"], json!([]));

    let (_, listed) = send(&app, empty_request(Method::GET, "/api/forms")).await;
    assert_eq!(listed[0]["fields"], json!([]));
}

#[tokio::test]
async fn missing_values_are_defaulted() {
    let (app, _store) = memory_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/forms", r#"{"fields":[{"id":"q1"}],"extra":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert!(data.get("title").is_none());
    assert!(data.get("extra").is_none());
    assert_eq!(
        data["fields"][0],
        json!({
            "id": "q1",
            "type": "",
            "label": "",
            "options": [],
            "selectedOptions": [],
            "value": ""
        })
    );
}

#[tokio::test]
async fn loosely_typed_values_are_coerced() {
    let (app, _store) = memory_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/forms",
            r#"{"title":2024,"fields":[{"id":1,"value":true,"selectedOptions":["1"]}]}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "2024");
    assert_eq!(body["data"]["fields"][0]["id"], "1");
    assert_eq!(body["data"]["fields"][0]["value"], "true");
    assert_eq!(body["data"]["fields"][0]["selectedOptions"], json!([1]));
}

#[tokio::test]
async fn uncoercible_submission_fails_with_500() {
    let (app, store) = memory_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/forms",
            r#"{"fields":[{"id":"q1","selectedOptions":["first"]}]}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed To Submit Form");
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_json_is_rejected() {
    let (app, _store) = memory_app();

    let (status, body) = send(&app, json_request(Method::POST, "/api/forms", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed To Submit Form");
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn non_json_body_is_stored_as_empty_form() {
    let (app, store) = memory_app();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/forms")
        .header("content-type", "text/plain")
        .body(axum::body::Body::from(SURVEY_FORM))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Form Submitted Successfully");
    assert!(body["data"].get("title").is_none());
    assert_eq!(body["data"]["fields"], json!([]));
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn bodyless_post_is_stored_as_empty_form() {
    let (app, store) = memory_app();

    let (status, body) = send(&app, empty_request(Method::POST, "/api/forms")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fields"], json!([]));
    assert!(ObjectId::parse_str(body["data"]["_id"].as_str().unwrap()).is_ok());
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_json_body_is_stored_as_empty_form() {
    let (app, store) = memory_app();

    let (status, body) = send(&app, json_request(Method::POST, "/api/forms", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Form Submitted Successfully");
    assert_eq!(body["data"]["fields"], json!([]));
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let store = std::sync::Arc::new(form_service::services::InMemoryFormStore::new());
    let app = form_service::build_router(
        form_service::AppState::new(store.clone()).with_max_body_bytes(64),
    );
    let big_value = "x".repeat(256);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/forms",
            json!({ "title": big_value }).to_string(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["message"], "Failed To Submit Form");
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_empty_initially() {
    let (app, _store) = memory_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/forms")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn deleting_unknown_id_succeeds_without_changes() {
    let (app, store) = memory_app();
    send(&app, json_request(Method::POST, "/api/forms", SURVEY_FORM)).await;
    let unknown = ObjectId::new();

    let (status, body) = send(
        &app,
        empty_request(Method::DELETE, &format!("/api/forms/{}", unknown.to_hex())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Form Deleted Successfully" }));
    assert_eq!(store.find_all().await.unwrap().len(), 1);

    // The store itself reports the miss
    let outcome = store.delete_by_id(unknown).await.unwrap();
    assert_eq!(outcome.deleted_count, 0);
}

#[tokio::test]
async fn deleting_twice_reports_success_both_times() {
    let (app, store) = memory_app();
    let (_, created) = send(&app, json_request(Method::POST, "/api/forms", SURVEY_FORM)).await;
    let uri = format!("/api/forms/{}", created["data"]["_id"].as_str().unwrap());

    let (first, _) = send(&app, empty_request(Method::DELETE, &uri)).await;
    let (second, _) = send(&app, empty_request(Method::DELETE, &uri)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert!(store.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_only_the_target() {
    let (app, _store) = memory_app();
    let (_, first) = send(&app, json_request(Method::POST, "/api/forms", SURVEY_FORM)).await;
    let (_, second) = send(
        &app,
        json_request(Method::POST, "/api/forms", r#"{"title":"Other"}"#),
    )
    .await;

    send(
        &app,
        empty_request(
            Method::DELETE,
            &format!("/api/forms/{}", first["data"]["_id"].as_str().unwrap()),
        ),
    )
    .await;

    let (_, listed) = send(&app, empty_request(Method::GET, "/api/forms")).await;
    assert_eq!(listed, json!([second["data"]]));
}

#[tokio::test]
async fn malformed_id_fails_with_500() {
    let (app, _store) = memory_app();

    let (status, body) = send(&app, empty_request(Method::DELETE, "/api/forms/not-an-id")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed To Delete Form");
    assert!(body["error"].as_str().unwrap().contains("not-an-id"));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let (app, _store) = memory_app();

    let request = axum::http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/forms")
        .header("origin", "http://forms.example.com")
        .header("access-control-request-method", "DELETE")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request)
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let mut request = json_request(Method::POST, "/api/forms", SURVEY_FORM);
    request
        .headers_mut()
        .insert("origin", "http://other.example.org".parse().unwrap());
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (app, _store) = memory_app();

    let mut request = empty_request(Method::GET, "/api/forms");
    request
        .headers_mut()
        .insert("x-request-id", "req-42".parse().unwrap());
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let (app, _store) = memory_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
