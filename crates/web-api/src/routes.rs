use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use application::services::{CreateNoteRequest, RegisterUserRequest};
use application::{NoteDto, ProfileDto, UserSummaryDto};
use domain::{BodyPart, LinkId, Notification, NotificationId, Role, UserId};

use crate::auth::AuthResponse;
use crate::{error::ApiError, state::AppState, websocket};

const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    father_name: String,
    sex: String,
    date_of_birth: String, // YYYY-MM-DD
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct LinkDoctorPayload {
    doc_username: String,
}

#[derive(Debug, Deserialize)]
struct DoctorRespondPayload {
    patient_id: i64,
    action: String,
}

#[derive(Debug, Deserialize)]
struct DiagnosisPayload {
    link: i64,
    diagnosis: String,
}

#[derive(Debug, Deserialize)]
struct PrescriptionPayload {
    link: i64,
    prescription: String,
}

/// 日记条目请求体。patient_id 一律以认证身份为准，
/// 请求体里即使带了也会被忽略。
#[derive(Debug, Deserialize)]
struct CreateNotePayload {
    intensity: i32,
    pain_type: String,
    took_prescription: bool,
    #[serde(default)]
    description: String,
    body_part: i32,
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    patient_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct NotificationIdPayload {
    notification_id: i64,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
}

const STATUS_OK: StatusResponse = StatusResponse { status: "ok" };

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/profile", get(profile))
        .route("/diary/list_links", get(list_links))
        .route("/diary/link_doc/", post(link_doctor))
        .route("/diary/doc_respond", post(doctor_respond))
        .route("/diary/stats/", get(list_notes).post(create_note))
        .route("/diary/bodyparts/", get(body_parts))
        .route("/diary/diagnosis", post(set_diagnosis))
        .route("/diary/prescription", post(set_prescription))
        .route(
            "/diary/notifications/",
            get(list_notifications)
                .patch(mark_notification_read)
                .delete(delete_notification),
        )
        .route("/diary/notifications/ws", get(websocket::notifications_ws))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    let date_of_birth = NaiveDate::parse_from_str(&payload.date_of_birth, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request("date_of_birth must be YYYY-MM-DD"))?;

    let user = state
        .user_service
        .register(RegisterUserRequest {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            father_name: payload.father_name,
            sex: payload.sex,
            date_of_birth,
        })
        .await?;

    let token = state.jwt_service.generate_token(user.id, user.role)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserSummaryDto::from(&user),
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .user_service
        .authenticate(&payload.username, &payload.password)
        .await?;

    let token = state.jwt_service.generate_token(user.id, user.role)?;
    Ok(Json(AuthResponse {
        token,
        user: UserSummaryDto::from(&user),
    }))
}

async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileDto>, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    let dto = state.user_service.profile(auth.user_id).await?;
    Ok(Json(dto))
}

/// 患者与医生看到的条目结构不同，按角色分流。
async fn list_links(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;

    match auth.role {
        Role::Patient => {
            let links = state.diary_service.patient_links(auth.user_id).await?;
            Ok(Json(links).into_response())
        }
        Role::Doctor => {
            let links = state.diary_service.doctor_links(auth.user_id).await?;
            Ok(Json(links).into_response())
        }
    }
}

async fn link_doctor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LinkDoctorPayload>,
) -> Result<(StatusCode, Json<application::PatientLinkDto>), ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    auth.require_role(Role::Patient)?;

    let dto = state
        .diary_service
        .request_link(auth.user_id, &payload.doc_username)
        .await?;

    Ok((StatusCode::CREATED, Json(dto)))
}

async fn doctor_respond(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DoctorRespondPayload>,
) -> Result<Json<StatusResponse>, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    auth.require_role(Role::Doctor)?;

    state
        .diary_service
        .respond_to_link(auth.user_id, UserId::from(payload.patient_id), &payload.action)
        .await?;

    Ok(Json(STATUS_OK))
}

/// 患者查看自己的日记；医生可以通过 patient_id 查询参数查看患者的日记。
async fn list_notes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Vec<NoteDto>>, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;

    let patient_id = query.patient_id.map(UserId::from).unwrap_or(auth.user_id);
    let notes = state.diary_service.patient_notes(patient_id).await?;
    Ok(Json(notes))
}

async fn create_note(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateNotePayload>,
) -> Result<(StatusCode, Json<NoteDto>), ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    auth.require_role(Role::Patient)?;

    let note = state
        .diary_service
        .create_note(
            auth.user_id,
            CreateNoteRequest {
                intensity: payload.intensity,
                pain_type: payload.pain_type,
                took_prescription: payload.took_prescription,
                description: payload.description,
                body_part: payload.body_part,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(NoteDto::from(&note))))
}

async fn body_parts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<&'static [BodyPart]>, ApiError> {
    state.jwt_service.authenticate(&headers)?;
    Ok(Json(state.diary_service.body_parts()))
}

async fn set_diagnosis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DiagnosisPayload>,
) -> Result<Json<StatusResponse>, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    auth.require_role(Role::Doctor)?;

    state
        .diary_service
        .set_diagnosis(LinkId::from(payload.link), payload.diagnosis)
        .await?;

    Ok(Json(STATUS_OK))
}

async fn set_prescription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PrescriptionPayload>,
) -> Result<Json<StatusResponse>, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    auth.require_role(Role::Doctor)?;

    state
        .diary_service
        .set_prescription(LinkId::from(payload.link), payload.prescription)
        .await?;

    Ok(Json(STATUS_OK))
}

async fn list_notifications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    let items = state.notification_service.list(auth.user_id).await?;
    Ok(Json(items))
}

async fn mark_notification_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NotificationIdPayload>,
) -> Result<StatusCode, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    state
        .notification_service
        .mark_read(NotificationId::from(payload.notification_id), auth.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NotificationIdPayload>,
) -> Result<StatusCode, ApiError> {
    let auth = state.jwt_service.authenticate(&headers)?;
    state
        .notification_service
        .delete(NotificationId::from(payload.notification_id), auth.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
