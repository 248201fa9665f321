// src/services/transaction_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AssetRepository, EmployeeRepository, TransactionRepository},
    models::{
        asset::AssetStatus,
        employee::{Employee, EmployeeStatus},
        transaction::{NewTransaction, Transaction, TransactionType},
    },
};

/// Estado que o ativo assume depois da movimentação: (status, assignedTo).
///
/// Check-Out só parte de `Available`; Check-In é aceito de qualquer status
/// e sempre devolve o ativo para `Available`, sem responsável.
pub fn next_asset_state(
    current: AssetStatus,
    kind: TransactionType,
    employee_id: Uuid,
) -> Result<(AssetStatus, Option<Uuid>), AppError> {
    match kind {
        TransactionType::CheckOut if current == AssetStatus::Available => {
            Ok((AssetStatus::CheckedOut, Some(employee_id)))
        }
        TransactionType::CheckOut => Err(AppError::Conflict("Asset is not available for check-out.".to_string())),
        TransactionType::CheckIn => Ok((AssetStatus::Available, None)),
    }
}

/// Quem pode ser o funcionário da movimentação.
///
/// Removidos ou com status diferente de `Active` ainda devolvem (Check-In),
/// mas não retiram nada.
pub fn ensure_eligible_subject(employee: &Employee, kind: TransactionType) -> Result<(), AppError> {
    if kind != TransactionType::CheckOut {
        return Ok(());
    }
    if employee.deleted_at.is_some() {
        return Err(AppError::NotFound("Employee"));
    }
    if employee.status != EmployeeStatus::Active {
        return Err(AppError::Conflict("Employee is not active and cannot check out assets.".to_string()));
    }
    Ok(())
}

// O "Transaction Engine": grava a movimentação e muda o ativo num único commit.
#[derive(Clone)]
pub struct TransactionService {
    asset_repo: AssetRepository,
    employee_repo: EmployeeRepository,
    transaction_repo: TransactionRepository,
    pool: PgPool,
}

impl TransactionService {
    pub fn new(
        asset_repo: AssetRepository,
        employee_repo: EmployeeRepository,
        transaction_repo: TransactionRepository,
        pool: PgPool,
    ) -> Self {
        Self { asset_repo, employee_repo, transaction_repo, pool }
    }

    pub async fn record(&self, company_id: Uuid, command: NewTransaction) -> Result<Transaction, AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        // Qualquer `?` abaixo derruba o tx sem commit => rollback.
        let mut tx = self.pool.begin().await?;

        // 1. Trava a linha do ativo. Check-Outs concorrentes esperam aqui.
        let asset = self
            .asset_repo
            .lock_for_update(&mut *tx, company_id, command.asset_id)
            .await?
            .ok_or(AppError::NotFound("Asset"))?;

        // 2. O funcionário precisa ser do mesmo tenant
        let employee = self
            .employee_repo
            .find_including_deleted(&mut *tx, company_id, command.employee_id)
            .await?
            .ok_or(AppError::NotFound("Employee"))?;
        ensure_eligible_subject(&employee, command.transaction_type)?;

        // 3. Quem registra também é do tenant
        let actor = self
            .employee_repo
            .find_including_deleted(&mut *tx, company_id, command.created_by)
            .await?;
        if !matches!(actor, Some(ref a) if a.deleted_at.is_none()) {
            return Err(AppError::NotFound("Employee"));
        }

        // 4. Calcula o novo estado antes de escrever qualquer coisa
        let (status, assigned_to) = next_asset_state(asset.status, command.transaction_type, employee.id)?;

        // 5. Histórico
        let transaction = self.transaction_repo.insert(&mut *tx, company_id, &command).await?;

        // 6. Ativo
        self.asset_repo
            .apply_transition(&mut *tx, company_id, asset.id, status, assigned_to)
            .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!(
            company_id = %company_id,
            transaction_id = %transaction.id,
            asset_id = %asset.id,
            employee_id = %employee.id,
            kind = ?command.transaction_type,
            "transaction recorded"
        );

        Ok(transaction)
    }
}
