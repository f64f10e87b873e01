// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router-level tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence and a UTC calendar.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        calendar: AttendanceCalendar::utc(),
    }
}

fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

/// Sends a request and returns the status and parsed JSON body.
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, value)
}

fn student_body(usn: &str) -> Value {
    json!({
        "name": "A",
        "usn": usn,
        "age": "20",
        "course": "CS",
        "phone": "555"
    })
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

// ============================================================================
// Students
// ============================================================================

#[tokio::test]
async fn test_enroll_student_and_list() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "POST", "/api/students", Some(student_body("U1"))).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!({ "message": "Student saved to database!" }));

    let (status, body) = send(&app, "GET", "/api/students", None).await;
    assert_eq!(status, HttpStatusCode::OK);

    let students = body.as_array().unwrap();
    assert_eq!(students.len(), 1);
    let student = &students[0];
    assert!(student["_id"].is_string());
    assert_eq!(student["usn"], "U1");
    assert_eq!(student["name"], "A");
    assert!(student["enrolledAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_enroll_student_accepts_numeric_fields() {
    let app: Router = create_test_app();
    let body = json!({
        "name": "A",
        "usn": "U1",
        "age": 20,
        "course": "CS",
        "phone": 9_876_543_210_u64
    });

    let (status, _) = send(&app, "POST", "/api/students", Some(body)).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/students", None).await;
    assert_eq!(body[0]["age"], "20");
    assert_eq!(body[0]["phone"], "9876543210");
}

#[tokio::test]
async fn test_enroll_student_missing_field_is_bad_request() {
    let app: Router = create_test_app();
    let mut body = student_body("U1");
    body["phone"] = json!("");

    let (status, body) = send(&app, "POST", "/api/students", Some(body)).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "All fields are required" }));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request_with_message() {
    let app: Router = create_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/students")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert!(body["message"].is_string());
}

// ============================================================================
// Attendance
// ============================================================================

#[tokio::test]
async fn test_attendance_scenario() {
    let app: Router = create_test_app();

    let (status, _) = send(&app, "POST", "/api/students", Some(student_body("U1"))).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance",
        Some(json!({ "usn": "U1", "recognizedAt": "2024-01-01T09:05" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!({ "message": "Attendance logged successfully" }));

    let (_, logs) = send(&app, "GET", "/api/attendance", None).await;
    assert_eq!(logs[0]["name"], "A");
    assert_eq!(logs[0]["course"], "CS");
    assert_eq!(logs[0]["recognizedAt"], "2024-01-01T09:05:00.000Z");

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance",
        Some(json!({ "usn": "U1", "recognizedAt": "2024-01-01T15:00" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "Attendance already recorded for today" })
    );

    let (status, body) = send(
        &app,
        "POST",
        "/api/periodwise-attendance",
        Some(json!({ "usn": "U1", "recognizedAt": "2024-01-01T09:05" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["message"], "Period-wise attendance recorded for Java");
    assert_eq!(body["log"]["period"], "Java");
    assert_eq!(body["log"]["usn"], "U1");
    assert!(body["log"]["_id"].is_string());

    let (_, logs) = send(&app, "GET", "/api/periodwise-attendance", None).await;
    assert_eq!(logs.as_array().unwrap().len(), 1);
    assert_eq!(logs[0]["period"], "Java");
}

#[tokio::test]
async fn test_attendance_missing_usn_is_bad_request() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "POST", "/api/attendance", Some(json!({}))).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "USN is required" }));
}

#[tokio::test]
async fn test_attendance_unknown_student_is_not_found() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "POST", "/api/attendance", Some(json!({ "usn": "X" }))).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "message": "Student not found, insufficient manual data provided" })
    );
}

#[tokio::test]
async fn test_attendance_bad_timestamp_is_bad_request() {
    let app: Router = create_test_app();
    send(&app, "POST", "/api/students", Some(student_body("U1"))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance",
        Some(json!({ "usn": "U1", "recognizedAt": "not a time" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid recognizedAt timestamp" }));
}

#[tokio::test]
async fn test_attendance_outside_storable_years_is_rejected() {
    let app: Router = create_test_app();
    send(&app, "POST", "/api/students", Some(student_body("U1"))).await;

    for recognized_at in [json!(253_402_300_800_000_i64), json!(-62_198_755_200_000_i64)] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/attendance",
            Some(json!({
                "usn": "X1",
                "name": "N",
                "course": "C",
                "recognizedAt": recognized_at
            })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Invalid recognizedAt timestamp" }));

        let (status, _) = send(
            &app,
            "POST",
            "/api/periodwise-attendance",
            Some(json!({ "usn": "U1", "recognizedAt": recognized_at })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    let (status, logs) = send(&app, "GET", "/api/attendance", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(logs, json!([]));

    let (status, logs) = send(&app, "GET", "/api/periodwise-attendance", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(logs, json!([]));
}

#[tokio::test]
async fn test_attendance_blank_or_zero_timestamp_is_logged_now() {
    let app: Router = create_test_app();
    send(&app, "POST", "/api/students", Some(student_body("U1"))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance",
        Some(json!({ "usn": "U1", "recognizedAt": "" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!({ "message": "Attendance logged successfully" }));

    let (_, logs) = send(&app, "GET", "/api/attendance", None).await;
    let recognized_at = logs[0]["recognizedAt"].as_str().unwrap();
    assert!(!recognized_at.starts_with("1970"));

    // Zero also means now, so it collides with the entry above.
    let (status, body) = send(
        &app,
        "POST",
        "/api/attendance",
        Some(json!({ "usn": "U1", "recognizedAt": 0 })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "Attendance already recorded for today" })
    );
}

#[tokio::test]
async fn test_periodwise_outside_class_hours_is_bad_request() {
    let app: Router = create_test_app();
    send(&app, "POST", "/api/students", Some(student_body("U1"))).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/periodwise-attendance",
        Some(json!({ "usn": "U1", "recognizedAt": "2024-01-01T10:09" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "No valid class period at this time" })
    );
}

#[tokio::test]
async fn test_periodwise_unknown_student_is_not_found() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/periodwise-attendance",
        Some(json!({ "usn": "X", "recognizedAt": "2024-01-01T09:05" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Student not found" }));
}

#[tokio::test]
async fn test_periodwise_duplicate_is_bad_request() {
    let app: Router = create_test_app();
    send(&app, "POST", "/api/students", Some(student_body("U1"))).await;
    let body = json!({ "usn": "U1", "recognizedAt": "2024-01-01T18:40" });

    let (first, _) = send(&app, "POST", "/api/periodwise-attendance", Some(body.clone())).await;
    let (second, message) = send(&app, "POST", "/api/periodwise-attendance", Some(body)).await;

    assert_eq!(first, HttpStatusCode::OK);
    assert_eq!(second, HttpStatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        json!({ "message": "Attendance already recorded for React today" })
    );
}

// ============================================================================
// Admin auth
// ============================================================================

#[tokio::test]
async fn test_signup_and_signin() {
    let app: Router = create_test_app();
    let signup_body = json!({
        "username": "Root",
        "email": "root@example.com",
        "password": "hunter2"
    });

    let (status, body) = send(&app, "POST", "/signup", Some(signup_body.clone())).await;
    assert_eq!(status, HttpStatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Admin created successfully" }));

    let (status, body) = send(&app, "POST", "/signup", Some(signup_body)).await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Email already registered" }));

    let (status, body) = send(
        &app,
        "POST",
        "/signin",
        Some(json!({ "email": "root@example.com", "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Signin successful",
            "admin": { "username": "Root", "email": "root@example.com" }
        })
    );
}

#[tokio::test]
async fn test_signup_missing_field_is_bad_request() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/signup",
        Some(json!({ "username": "Root", "email": "root@example.com" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "All fields are required" }));
}

#[tokio::test]
async fn test_signin_failures() {
    let app: Router = create_test_app();
    send(
        &app,
        "POST",
        "/signup",
        Some(json!({ "username": "Root", "email": "root@example.com", "password": "pw" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/signin",
        Some(json!({ "email": "root@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid password" }));

    let (status, body) = send(
        &app,
        "POST",
        "/signin",
        Some(json!({ "email": "other@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Admin not found" }));
}

// ============================================================================
// Cross-cutting
// ============================================================================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app: Router = create_test_app();
    let request = Request::builder()
        .method("GET")
        .uri("/api/students")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[test]
fn test_internal_errors_use_fixed_message() {
    let err: HttpError = HttpError::from_api(
        ApiError::Internal {
            message: String::from("Database error: disk I/O error"),
        },
        "Failed to fetch students",
    );

    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to fetch students");
}

#[test]
fn test_conflict_maps_to_bad_request() {
    let err: HttpError = HttpError::from_api(
        ApiError::Conflict {
            message: String::from("Attendance already recorded for today"),
        },
        "Failed to log attendance",
    );

    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "Attendance already recorded for today");
}
