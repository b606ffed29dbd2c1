use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use actix_web::{http::StatusCode, middleware, web, App, HttpRequest, HttpResponse, HttpServer, ResponseError, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::grid::{compute_slot_geometry, minutes_to_time, time_to_minutes, GridConfig};
use crate::render::{render_page, GridActionError, GridHandlers, TimeGrid};
use crate::session::{parse_sessions, partition_valid, validate_session, DayOfWeek, ScheduledSession, SessionError, SessionType};

// In-memory copy of the sessions served by the remote timetable API
pub struct AppState {
    pub sessions: Mutex<Vec<ScheduledSession>>,
    pub grid: GridConfig,
    pub admin_password: String,
}

impl AppState {
    pub fn new(sessions: Vec<ScheduledSession>, grid: GridConfig, admin_password: String) -> Self {
        Self {
            sessions: Mutex::new(sessions),
            grid,
            admin_password,
        }
    }

    fn sessions(&self) -> Result<MutexGuard<'_, Vec<ScheduledSession>>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store is poisoned".to_string()))
    }

    fn authorize(&self, req: &HttpRequest) -> Result<(), ApiError> {
        let password = req
            .headers()
            .get("X-Admin-Password")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if password == self.admin_password {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized,
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Conflict(msg) | ApiError::Internal(msg) => {
                write!(f, "{}", msg)
            }
            ApiError::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string()
        }))
    }
}

impl From<GridActionError> for ApiError {
    fn from(err: GridActionError) -> Self {
        match err {
            GridActionError::UnknownSession(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Io(_) => ApiError::Internal(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
pub struct TimetableQuery {
    readonly: Option<String>,
    day: Option<DayOfWeek>,
}

impl TimetableQuery {
    fn is_read_only(&self) -> bool {
        self.readonly.as_deref().is_some_and(parse_flag)
    }
}

/// Parses a query flag from various string representations
fn parse_flag(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower.is_empty() || lower == "yes" || lower == "true" || lower == "1"
}

/// Parses an admin request body after the password check
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid request body: {}", e)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotClickRequest {
    day: DayOfWeek,
    start_time: String,
}

/// Pre-filled values for a new session proposed from an empty cell
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    day_of_week: DayOfWeek,
    start_time: String,
    end_time: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    total: usize,
    by_day: BTreeMap<DayOfWeek, u32>,
    by_type: BTreeMap<SessionType, u32>,
    cancelled: u32,
    invalid: u32,
    hidden: u32,
}

/// What a grid handler asked the server to do
enum GridOutcome {
    Draft(DayOfWeek, String),
    Edit(ScheduledSession),
    Delete(String),
}

fn grid_handlers(outcome: &RefCell<Option<GridOutcome>>) -> GridHandlers<'_> {
    GridHandlers::new()
        .on_slot_click(move |day, start| *outcome.borrow_mut() = Some(GridOutcome::Draft(day, start.to_string())))
        .on_edit(move |session| *outcome.borrow_mut() = Some(GridOutcome::Edit(session.clone())))
        .on_delete(move |session| *outcome.borrow_mut() = Some(GridOutcome::Delete(session.id.clone())))
}

// Admin login endpoint
async fn admin_login(req: web::Json<LoginRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Err(ApiError::Unauthorized.into())
    }
}

// Replaces the whole session list with an uploaded JSON array
async fn admin_upload(req: HttpRequest, body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    state.authorize(&req)?;
    let sessions = parse_sessions(&body).map_err(ApiError::from)?;
    let count = sessions.len();
    let invalid = partition_valid(&sessions).1.len();
    *state.sessions()? = sessions;
    info!("Uploaded {} sessions ({} invalid)", count, invalid);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "sessions": count,
        "invalid": invalid
    })))
}

async fn list_sessions(state: web::Data<AppState>) -> Result<HttpResponse> {
    let sessions = state.sessions()?;
    Ok(HttpResponse::Ok().json(&*sessions))
}

// Edit affordance: returns the session so the caller can open its form
async fn get_session(id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sessions = state.sessions()?;
    let outcome = RefCell::new(None);
    TimeGrid::new(&sessions, &state.grid)
        .with_handlers(grid_handlers(&outcome))
        .edit(&id)
        .map_err(ApiError::from)?;

    match outcome.into_inner() {
        Some(GridOutcome::Edit(session)) => Ok(HttpResponse::Ok().json(session)),
        _ => Err(ApiError::Internal("edit handler did not run".to_string()).into()),
    }
}

async fn get_geometry(id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sessions = state.sessions()?;
    let session = sessions
        .iter()
        .find(|s| s.id == *id)
        .ok_or_else(|| ApiError::NotFound(format!("no session with id '{}'", id)))?;
    let geometry = compute_slot_geometry(session, &state.grid).map_err(ApiError::from)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": session.id,
        "day": session.day_of_week,
        "visible": state.grid.shows_day(session.day_of_week),
        "geometry": geometry
    })))
}

async fn create_session(req: HttpRequest, body: web::Bytes, state: web::Data<AppState>) -> Result<HttpResponse> {
    state.authorize(&req)?;
    let session: ScheduledSession = parse_body(&body)?;
    validate_session(&session).map_err(ApiError::from)?;

    let mut sessions = state.sessions()?;
    if sessions.iter().any(|s| s.id == session.id) {
        return Err(ApiError::Conflict(format!("session '{}' already exists", session.id)).into());
    }
    info!("Created session {}", session.id);
    sessions.push(session.clone());
    Ok(HttpResponse::Created().json(session))
}

async fn update_session(
    req: HttpRequest,
    id: web::Path<String>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    state.authorize(&req)?;
    let session: ScheduledSession = parse_body(&body)?;
    if session.id != *id {
        return Err(ApiError::BadRequest(format!("body id '{}' does not match path id '{}'", session.id, id)).into());
    }
    validate_session(&session).map_err(ApiError::from)?;

    let mut sessions = state.sessions()?;
    let slot = sessions
        .iter_mut()
        .find(|s| s.id == *id)
        .ok_or_else(|| ApiError::NotFound(format!("no session with id '{}'", id)))?;
    *slot = session.clone();
    info!("Updated session {}", id);
    Ok(HttpResponse::Ok().json(session))
}

async fn delete_session(req: HttpRequest, id: web::Path<String>, state: web::Data<AppState>) -> Result<HttpResponse> {
    state.authorize(&req)?;
    let mut sessions = state.sessions()?;
    let outcome = RefCell::new(None);
    TimeGrid::new(&sessions, &state.grid)
        .with_handlers(grid_handlers(&outcome))
        .delete(&id)
        .map_err(ApiError::from)?;

    if let Some(GridOutcome::Delete(deleted)) = outcome.into_inner() {
        sessions.retain(|s| s.id != deleted);
        info!("Deleted session {}", deleted);
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// Slot-click affordance: proposes a one-slot session starting at the clicked cell
async fn slot_click(req: web::Json<SlotClickRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sessions = state.sessions()?;
    let outcome = RefCell::new(None);
    TimeGrid::new(&sessions, &state.grid)
        .with_handlers(grid_handlers(&outcome))
        .click_slot(req.day, &req.start_time)
        .map_err(ApiError::from)?;

    match outcome.into_inner() {
        Some(GridOutcome::Draft(day, start)) => {
            let start_minutes = time_to_minutes(&start).map_err(|e| ApiError::BadRequest(e.to_string()))?;
            Ok(HttpResponse::Ok().json(SessionDraft {
                day_of_week: day,
                start_time: start,
                end_time: minutes_to_time(start_minutes + state.grid.slot_minutes()),
            }))
        }
        _ => Err(ApiError::Internal("slot-click handler did not run".to_string()).into()),
    }
}

// Stats endpoint
async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let sessions = state.sessions()?;
    let mut by_day: BTreeMap<DayOfWeek, u32> = BTreeMap::new();
    let mut by_type: BTreeMap<SessionType, u32> = BTreeMap::new();
    let mut cancelled = 0;
    let mut invalid = 0;
    let mut hidden = 0;

    for session in sessions.iter() {
        *by_day.entry(session.day_of_week).or_insert(0) += 1;
        *by_type.entry(session.session_type).or_insert(0) += 1;
        if session.is_cancelled {
            cancelled += 1;
        }
        if validate_session(session).is_err() {
            invalid += 1;
        }
        if !state.grid.shows_day(session.day_of_week) {
            hidden += 1;
        }
    }

    Ok(HttpResponse::Ok().json(StatsResponse {
        total: sessions.len(),
        by_day,
        by_type,
        cancelled,
        invalid,
        hidden,
    }))
}

// HTML page handler
async fn timetable_page(query: web::Query<TimetableQuery>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sessions = state.sessions()?;
    let single_day;
    let (config, title) = match query.day {
        Some(day) => {
            single_day = GridConfig::new(
                vec![day],
                &state.grid.first_slot(),
                &minutes_to_time(state.grid.window_end_minutes()),
                state.grid.slot_minutes(),
                state.grid.slot_height_px(),
            )
            .map_err(|e| ApiError::Internal(e.to_string()))?;
            (&single_day, format!("Timetable - {}", day.label()))
        }
        None => (&state.grid, "Weekly Timetable".to_string()),
    };

    let outcome = RefCell::new(None);
    let grid = TimeGrid::new(&sessions, config)
        .read_only(query.is_read_only())
        .with_handlers(grid_handlers(&outcome));
    let html = render_page(&title, &grid).into_string();

    Ok(HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("invalid request body: {}", err)).into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("invalid query string: {}", err)).into()
    });

    cfg.app_data(json_config)
        .app_data(query_config)
        .route("/", web::get().to(timetable_page))
        .route("/timetable", web::get().to(timetable_page))
        .route("/api/login", web::post().to(admin_login))
        .route("/api/upload", web::post().to(admin_upload))
        .route("/api/stats", web::get().to(get_stats))
        .route("/api/grid/slot-click", web::post().to(slot_click))
        .route("/api/sessions", web::get().to(list_sessions))
        .route("/api/sessions", web::post().to(create_session))
        .service(
            web::resource("/api/sessions/{id}")
                .route(web::get().to(get_session))
                .route(web::put().to(update_session)),
        )
        .route("/api/sessions/{id}/geometry", web::get().to(get_geometry))
        .route("/api/sessions/{id}/delete", web::post().to(delete_session));
}

pub async fn start_server(config: AppConfig, sessions: Vec<ScheduledSession>) -> std::io::Result<()> {
    let port = config.port;
    let app_state = web::Data::new(AppState::new(sessions, config.grid, config.admin_password));

    info!("Listening on http://0.0.0.0:{}", port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
