// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::{CookieJar, WithRejection};
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::auth::{removal_cookie, session_cookie},
    models::auth::{LoginPayload, OkResponse, RegisterPayload, RegisterResponse},
};

// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sessão criada (cookie `session`)", body = OkResponse),
        (status = 400, description = "Campos obrigatórios ausentes", body = ErrorBody),
        (status = 401, description = "Credenciais inválidas", body = ErrorBody)
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::BadRequest("email and password are required".to_string()));
    };

    let (token, _employee) = app_state.auth_service.login(&email, &password).await?;

    let jar = CookieJar::new().add(session_cookie(token, app_state.config.cookie_secure));
    Ok((jar, Json(OkResponse::ok())))
}

// POST /api/register
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Auth",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Empresa e administrador criados", body = RegisterResponse),
        (status = 400, description = "Dados inválidos", body = ErrorBody),
        (status = 409, description = "E-mail já cadastrado", body = ErrorBody)
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (Some(company_name), Some(name), Some(email), Some(password)) =
        (payload.company_name, payload.name, payload.email, payload.password)
    else {
        return Err(AppError::BadRequest("companyName, name, email and password are required".to_string()));
    };

    let (company, employee) = app_state
        .auth_service
        .register(&company_name, payload.company_address.as_deref(), &name, &email, &password)
        .await?;

    let response = RegisterResponse { company_id: company.id, employee_id: employee.id };
    Ok((StatusCode::CREATED, Json(response)))
}

// POST /api/logout
// Idempotente: sempre 200, sempre apaga o cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    tag = "Auth",
    responses((status = 200, description = "Sessão encerrada", body = OkResponse))
)]
pub async fn logout() -> impl IntoResponse {
    (CookieJar::new().add(removal_cookie()), Json(OkResponse::ok()))
}
