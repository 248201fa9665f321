// src/db/transaction_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::transaction::{NewTransaction, Transaction, TransactionSummary},
};

// Histórico de movimentações. Só INSERT e SELECT: uma transação gravada nunca muda.
#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        command: &NewTransaction,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                company_id, asset_id, employee_id, transaction_type, notes, condition, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(command.asset_id)
        .bind(command.employee_id)
        .bind(command.transaction_type)
        .bind(&command.notes)
        .bind(command.condition)
        .bind(command.created_by)
        .fetch_one(executor)
        .await?;

        Ok(transaction)
    }

    // Mais recentes primeiro, com nome do ativo e do funcionário resolvidos.
    // O JOIN também filtra por company_id para nunca misturar tenants.
    pub async fn list_recent(&self, company_id: Uuid, limit: i64) -> Result<Vec<TransactionSummary>, AppError> {
        let rows = sqlx::query_as::<_, TransactionSummary>(
            r#"
            SELECT
                t.id,
                t.transaction_type,
                t.date,
                t.notes,
                t.condition,
                t.created_by,
                a.id AS asset_id,
                a.name AS asset_name,
                e.id AS employee_id,
                e.name AS employee_name
            FROM transactions t
            JOIN assets a ON a.id = t.asset_id AND a.company_id = t.company_id
            JOIN employees e ON e.id = t.employee_id AND e.company_id = t.company_id
            WHERE t.company_id = $1
            ORDER BY t.date DESC, t.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(company_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
