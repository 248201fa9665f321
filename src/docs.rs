// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::common::error::ErrorBody;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::logout,

        // --- Assets ---
        handlers::assets::list_assets,
        handlers::assets::create_asset,
        handlers::assets::get_asset,
        handlers::assets::update_asset,
        handlers::assets::delete_asset,
        handlers::assets::count_assets,
        handlers::assets::total_value,

        // --- Employees ---
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::get_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,
        handlers::employees::get_me,
        handlers::employees::update_me,
        handlers::employees::count_employees,

        // --- Transactions ---
        handlers::transactions::create_transaction,
        handlers::transactions::list_transactions,
        handlers::transactions::pending_returns,

        // --- Companies ---
        handlers::companies::get_my_company,
        handlers::companies::update_my_company,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
    ),
    components(
        schemas(
            ErrorBody,

            // --- Auth ---
            models::auth::LoginPayload,
            models::auth::RegisterPayload,
            models::auth::RegisterResponse,
            models::auth::OkResponse,

            // --- Company ---
            models::company::Company,
            models::company::UpdateCompanyPayload,

            // --- Employee ---
            models::employee::EmployeeStatus,
            models::employee::Employee,
            models::employee::CreateEmployeePayload,
            models::employee::UpdateEmployeePayload,

            // --- Asset ---
            models::asset::AssetType,
            models::asset::AssetStatus,
            models::asset::Asset,
            models::asset::CreateAssetPayload,
            models::asset::UpdateAssetPayload,

            // --- Transaction ---
            models::transaction::TransactionType,
            models::transaction::AssetCondition,
            models::transaction::Transaction,
            models::transaction::TransactionSummary,
            models::transaction::CreateTransactionPayload,

            // --- Dashboard ---
            models::dashboard::CountResponse,
            models::dashboard::TotalValueResponse,
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Login, registro e logout (cookie de sessão)"),
        (name = "Assets", description = "Ativos da empresa"),
        (name = "Employees", description = "Funcionários da empresa"),
        (name = "Transactions", description = "Check-In / Check-Out"),
        (name = "Companies", description = "Dados da empresa (tenant)"),
        (name = "Dashboard", description = "Indicadores gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session"))),
        );
    }
}
