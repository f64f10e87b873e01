// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use attendance_api::{
    ApiError, EnrollStudentRequest, LogAttendanceRequest, LogPeriodAttendanceRequest,
    LogPeriodAttendanceResponse, MessageResponse, SigninRequest, SigninResponse, SignupRequest,
    enroll_student, list_attendance, list_period_attendance, list_students, log_daily_attendance,
    log_period_attendance, signin, signup,
};
use attendance_domain::{AttendanceCalendar, AttendanceLog, PeriodwiseAttendanceLog, Student};
use attendance_persistence::Persistence;
use axum::{
    Json, Router,
    extract::{State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// Attendance Server - HTTP backend for classroom attendance tracking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "ATTENDANCE_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "ATTENDANCE_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "ATTENDANCE_PORT", default_value_t = 5001)]
    port: u16,

    /// IANA timezone for class periods and day boundaries (e.g. `Asia/Kolkata`).
    /// If not provided, uses the host's local timezone.
    #[arg(short, long, env = "ATTENDANCE_TIMEZONE")]
    timezone: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, behind a Mutex for safe concurrent access.
    persistence: Arc<Mutex<Persistence>>,
    /// Timezone used for period lookup and daily de-duplication.
    calendar: AttendanceCalendar,
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error message.
    message: String,
}

/// Liveness response body.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl HttpError {
    /// Maps an API error to a response.
    ///
    /// Internal errors are logged and replaced by the endpoint's
    /// `failure_message`; their detail never reaches the client.
    fn from_api(err: ApiError, failure_message: &'static str) -> Self {
        match err {
            ApiError::InvalidInput { .. } | ApiError::Conflict { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Internal { message } => {
                error!(error = %message, "{}", failure_message);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: failure_message.to_string(),
                }
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

/// Handler for POST `/api/students` endpoint.
///
/// Enrolls a student.
async fn handle_enroll_student(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<EnrollStudentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HttpError> {
    let Json(req) = payload?;
    info!(usn = ?req.usn, "Handling enroll_student request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<MessageResponse, ApiError> =
        enroll_student(&mut *persistence, &req, Utc::now());
    drop(persistence);

    let response: MessageResponse =
        result.map_err(|e| HttpError::from_api(e, "Failed to save student"))?;

    Ok(Json(response))
}

/// Handler for GET `/api/students` endpoint.
async fn handle_list_students(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<Student>>, HttpError> {
    info!("Handling list_students request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<Vec<Student>, ApiError> = list_students(&mut *persistence);
    drop(persistence);

    let students: Vec<Student> =
        result.map_err(|e| HttpError::from_api(e, "Failed to fetch students"))?;

    Ok(Json(students))
}

/// Handler for POST `/api/attendance` endpoint.
///
/// Records daily attendance.
async fn handle_log_attendance(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<LogAttendanceRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HttpError> {
    let Json(req) = payload?;
    info!(usn = ?req.usn, "Handling log_attendance request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<MessageResponse, ApiError> =
        log_daily_attendance(&mut *persistence, &app_state.calendar, &req, Utc::now());
    drop(persistence);

    let response: MessageResponse =
        result.map_err(|e| HttpError::from_api(e, "Failed to log attendance"))?;

    Ok(Json(response))
}

/// Handler for GET `/api/attendance` endpoint.
async fn handle_list_attendance(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<AttendanceLog>>, HttpError> {
    info!("Handling list_attendance request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<Vec<AttendanceLog>, ApiError> = list_attendance(&mut *persistence);
    drop(persistence);

    let logs: Vec<AttendanceLog> =
        result.map_err(|e| HttpError::from_api(e, "Failed to fetch attendance logs"))?;

    Ok(Json(logs))
}

/// Handler for POST `/api/periodwise-attendance` endpoint.
///
/// Records attendance for the class period in progress.
async fn handle_log_period_attendance(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<LogPeriodAttendanceRequest>, JsonRejection>,
) -> Result<Json<LogPeriodAttendanceResponse>, HttpError> {
    let Json(req) = payload?;
    info!(usn = ?req.usn, "Handling log_period_attendance request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<LogPeriodAttendanceResponse, ApiError> =
        log_period_attendance(&mut *persistence, &app_state.calendar, &req, Utc::now());
    drop(persistence);

    let response: LogPeriodAttendanceResponse =
        result.map_err(|e| HttpError::from_api(e, "Internal server error"))?;

    Ok(Json(response))
}

/// Handler for GET `/api/periodwise-attendance` endpoint.
async fn handle_list_period_attendance(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<PeriodwiseAttendanceLog>>, HttpError> {
    info!("Handling list_period_attendance request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<Vec<PeriodwiseAttendanceLog>, ApiError> =
        list_period_attendance(&mut *persistence);
    drop(persistence);

    let logs: Vec<PeriodwiseAttendanceLog> =
        result.map_err(|e| HttpError::from_api(e, "Failed to fetch periodwise attendance logs"))?;

    Ok(Json(logs))
}

/// Handler for POST `/signup` endpoint.
///
/// Registers an admin. Responds with 201 on success.
async fn handle_signup(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), HttpError> {
    let Json(req) = payload?;
    info!(email = ?req.email, "Handling signup request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<MessageResponse, ApiError> = signup(&mut *persistence, &req);
    drop(persistence);

    let response: MessageResponse = result.map_err(|e| HttpError::from_api(e, "Server error"))?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/signin` endpoint.
async fn handle_signin(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<SigninResponse>, HttpError> {
    let Json(req) = payload?;
    info!(email = ?req.email, "Handling signin request");

    let mut persistence = app_state.persistence.lock().await;
    let result: Result<SigninResponse, ApiError> = signin(&mut *persistence, &req);
    drop(persistence);

    let response: SigninResponse = result.map_err(|e| HttpError::from_api(e, "Server error"))?;

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/students",
            get(handle_list_students).post(handle_enroll_student),
        )
        .route(
            "/api/attendance",
            get(handle_list_attendance).post(handle_log_attendance),
        )
        .route(
            "/api/periodwise-attendance",
            get(handle_list_period_attendance).post(handle_log_period_attendance),
        )
        .route("/signup", post(handle_signup))
        .route("/signin", post(handle_signin))
        .route("/health", get(handle_health))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Attendance Server");

    let calendar: AttendanceCalendar = match &args.timezone {
        Some(name) => AttendanceCalendar::from_timezone_name(name)?,
        None => AttendanceCalendar::SystemLocal,
    };
    info!("Using timezone: {}", calendar.name());

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        calendar,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

#[cfg(test)]
mod tests;
