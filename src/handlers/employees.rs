// src/handlers/employees.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    db::EmployeeFilter,
    middleware::{
        auth::AuthenticatedEmployee,
        rbac::{AdminRole, RequireRole},
        tenancy::{CompanyScope, TenantContext},
    },
    models::{
        auth::OkResponse,
        dashboard::{CompanyIdQuery, CountResponse},
        employee::{CreateEmployeePayload, Employee, EmployeeListQuery, UpdateEmployeePayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    params(EmployeeListQuery),
    responses((status = 200, body = [Employee]), (status = 401, body = ErrorBody)),
    security(("session_cookie" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Query(query), _): WithRejection<Query<EmployeeListQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let filter = EmployeeFilter { search: query.search, status: query.status };
    let employees = app_state.employee_repo.list(tenant.0, &filter).await?;

    Ok(Json(employees))
}

// POST /api/employees (apenas Admin)
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, body = Employee),
        (status = 400, body = ErrorBody),
        (status = 403, description = "Requer cargo Admin", body = ErrorBody),
        (status = 409, description = "E-mail ou employeeId duplicado", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    tenant: TenantContext,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEmployeePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.employee_service.create(tenant.0, payload).await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses((status = 200, body = Employee), (status = 404, body = ErrorBody)),
    security(("session_cookie" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state
        .employee_repo
        .find_by_id(tenant.0, id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(Json(employee))
}

// PUT /api/employees/{id} (apenas Admin; o próprio perfil vai por /me)
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, body = Employee),
        (status = 400, body = ErrorBody),
        (status = 403, description = "Requer cargo Admin", body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    tenant: TenantContext,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateEmployeePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let employee = app_state
        .employee_service
        .update(tenant.0, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(Json(employee))
}

// DELETE /api/employees/{id} (soft delete, apenas Admin)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do funcionário")),
    responses(
        (status = 200, body = OkResponse),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    tenant: TenantContext,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.employee_repo.soft_delete(tenant.0, id).await? {
        return Err(AppError::NotFound("Employee"));
    }

    Ok(Json(OkResponse::ok()))
}

// ---
// Perfil do próprio funcionário
// ---
#[utoipa::path(
    get,
    path = "/api/employees/me",
    tag = "Employees",
    responses((status = 200, body = Employee), (status = 401, body = ErrorBody)),
    security(("session_cookie" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    AuthenticatedEmployee(session): AuthenticatedEmployee,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state
        .employee_repo
        .find_by_id(session.company_id, session.employee_id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(Json(employee))
}

#[utoipa::path(
    put,
    path = "/api/employees/me",
    tag = "Employees",
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, body = Employee),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    AuthenticatedEmployee(session): AuthenticatedEmployee,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateEmployeePayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.for_self_service();
    payload.validate()?;
    if payload.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let employee = app_state
        .employee_service
        .update(session.company_id, session.employee_id, &payload)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;

    Ok(Json(employee))
}

// GET /api/employees/count?company_id=
#[utoipa::path(
    get,
    path = "/api/employees/count",
    tag = "Employees",
    params(CompanyIdQuery),
    responses(
        (status = 200, description = "Funcionários com status Active", body = CountResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn count_employees(
    State(app_state): State<AppState>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let total = app_state.dashboard_repo.count_active_employees(company_id).await?;
    Ok(Json(CountResponse { total }))
}
