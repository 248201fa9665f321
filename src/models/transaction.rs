// src/models/transaction.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "transaction_type")]
pub enum TransactionType {
    #[serde(rename = "Check-In")]
    #[sqlx(rename = "Check-In")]
    CheckIn,
    #[serde(rename = "Check-Out")]
    #[sqlx(rename = "Check-Out")]
    CheckOut,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "asset_condition")]
pub enum AssetCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

// --- TRANSACTION (Histórico imutável) ---
// Nunca sofre UPDATE depois de gravada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub company_id: Uuid,
    pub asset_id: Uuid,
    pub employee_id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub condition: Option<AssetCondition>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

// Linha da listagem "transações recentes", já com os nomes resolvidos
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: DateTime<Utc>,
    pub notes: Option<String>,
    pub condition: Option<AssetCondition>,
    pub created_by: Uuid,
    pub asset_id: Uuid,
    pub asset_name: String,
    pub employee_id: Uuid,
    pub employee_name: String,
}

pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentTransactionsQuery {
    /// Quantidade máxima de linhas (padrão 10, máximo 100)
    pub limit: Option<i64>,
}

impl RecentTransactionsQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }
}

// ---
// Payload: POST /transactions
// ---
// Todos opcionais no JSON: a ausência de qualquer obrigatório vira 400
// antes de qualquer escrita.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    #[validate(required(message = "assetId is required"))]
    pub asset_id: Option<Uuid>,

    #[validate(required(message = "employeeId is required"))]
    pub employee_id: Option<Uuid>,

    #[serde(rename = "type")]
    #[validate(required(message = "type is required"))]
    pub transaction_type: Option<TransactionType>,

    pub notes: Option<String>,
    pub condition: Option<AssetCondition>,

    #[validate(required(message = "createdBy is required"))]
    pub created_by: Option<Uuid>,
}

/// Comando já validado que o Transaction Engine executa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub asset_id: Uuid,
    pub employee_id: Uuid,
    pub transaction_type: TransactionType,
    pub notes: Option<String>,
    pub condition: Option<AssetCondition>,
    pub created_by: Uuid,
}

impl CreateTransactionPayload {
    pub fn into_command(self) -> Result<NewTransaction, ValidationErrors> {
        self.validate()?;

        match (self.asset_id, self.employee_id, self.transaction_type, self.created_by) {
            (Some(asset_id), Some(employee_id), Some(transaction_type), Some(created_by)) => {
                Ok(NewTransaction {
                    asset_id,
                    employee_id,
                    transaction_type,
                    notes: self.notes,
                    condition: self.condition,
                    created_by,
                })
            }
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("transaction", ValidationError::new("required"));
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_are_all_reported() {
        let payload: CreateTransactionPayload =
            serde_json::from_value(json!({ "assetId": Uuid::new_v4() })).unwrap();

        let errors = payload.into_command().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 3);
        assert!(!fields.keys().any(|k| k.contains("asset")));
    }

    #[test]
    fn complete_payload_becomes_a_command() {
        let asset = Uuid::new_v4();
        let employee = Uuid::new_v4();
        let actor = Uuid::new_v4();
        let payload: CreateTransactionPayload = serde_json::from_value(json!({
            "assetId": asset,
            "employeeId": employee,
            "type": "Check-Out",
            "condition": "Good",
            "createdBy": actor
        }))
        .unwrap();

        let command = payload.into_command().unwrap();
        assert_eq!(command.asset_id, asset);
        assert_eq!(command.employee_id, employee);
        assert_eq!(command.transaction_type, TransactionType::CheckOut);
        assert_eq!(command.condition, Some(AssetCondition::Good));
        assert_eq!(command.created_by, actor);
        assert!(command.notes.is_none());
    }

    #[test]
    fn unknown_type_is_rejected_by_serde() {
        let result: Result<CreateTransactionPayload, _> = serde_json::from_value(json!({
            "assetId": Uuid::new_v4(),
            "type": "Borrow"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn recent_limit_is_clamped() {
        assert_eq!(RecentTransactionsQuery::default().effective_limit(), DEFAULT_RECENT_LIMIT);
        assert_eq!(RecentTransactionsQuery { limit: Some(0) }.effective_limit(), 1);
        assert_eq!(RecentTransactionsQuery { limit: Some(5000) }.effective_limit(), MAX_RECENT_LIMIT);
    }
}
