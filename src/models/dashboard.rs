// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Parâmetro obrigatório dos endpoints agregados
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyIdQuery {
    pub company_id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CountResponse {
    pub total: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalValueResponse {
    #[schema(value_type = f64)]
    pub total_value: Decimal,
}

// Os cards do topo do painel, lidos num único snapshot
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub company_id: Uuid,
    pub total_assets: i64,
    #[schema(value_type = f64)]
    pub total_value: Decimal,
    pub pending_returns: i64,
    pub active_employees: i64,
}
