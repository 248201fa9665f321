// src/handlers/transactions.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    common::error::{AppError, ErrorBody},
    config::AppState,
    middleware::tenancy::{CompanyScope, TenantContext},
    models::{
        dashboard::{CompanyIdQuery, CountResponse},
        transaction::{CreateTransactionPayload, RecentTransactionsQuery, Transaction, TransactionSummary},
    },
};

// POST /api/transactions
// Check-In / Check-Out: grava o histórico e atualiza o ativo atomicamente.
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = CreateTransactionPayload,
    responses(
        (status = 201, description = "Transação registrada", body = Transaction),
        (status = 400, description = "Campos obrigatórios ausentes", body = ErrorBody),
        (status = 404, description = "Ativo ou funcionário fora do tenant", body = ErrorBody),
        (status = 409, description = "Ativo indisponível para Check-Out", body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Json(payload), _): WithRejection<Json<CreateTransactionPayload>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    // Validação antes de qualquer escrita
    let command = payload.into_command()?;

    let transaction = app_state.transaction_service.record(tenant.0, command).await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// GET /api/transactions?limit=
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    params(RecentTransactionsQuery),
    responses((status = 200, body = [TransactionSummary]), (status = 401, body = ErrorBody)),
    security(("session_cookie" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    WithRejection(Query(query), _): WithRejection<Query<RecentTransactionsQuery>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .transaction_repo
        .list_recent(tenant.0, query.effective_limit())
        .await?;

    Ok(Json(rows))
}

// GET /api/transactions/pending-returns?company_id=
#[utoipa::path(
    get,
    path = "/api/transactions/pending-returns",
    tag = "Transactions",
    params(CompanyIdQuery),
    responses(
        (status = 200, description = "Ativos atualmente em Checked Out", body = CountResponse),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("session_cookie" = []))
)]
pub async fn pending_returns(
    State(app_state): State<AppState>,
    CompanyScope(company_id): CompanyScope,
) -> Result<impl IntoResponse, AppError> {
    let total = app_state.dashboard_repo.count_pending_returns(company_id).await?;
    Ok(Json(CountResponse { total }))
}
