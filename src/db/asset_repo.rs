// src/db/asset_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{
        db_utils::{like_pattern, map_unique_violation},
        error::AppError,
    },
    models::asset::{Asset, AssetStatus, NewAsset, UpdateAssetPayload},
};

#[derive(Debug, Default, Clone)]
pub struct AssetFilter {
    pub search: Option<String>,
    pub status: Option<AssetStatus>,
}

// Toda consulta recebe o company_id da sessão: não existe leitura "global" de ativos.
#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, company_id: Uuid, filter: &AssetFilter) -> Result<Vec<Asset>, AppError> {
        let search = filter.search.as_deref().map(like_pattern);

        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT * FROM assets
            WHERE company_id = $1
              AND deleted_at IS NULL
              AND ($2::text IS NULL OR name ILIKE $2 OR serial_number ILIKE $2)
              AND ($3::asset_status IS NULL OR status = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(search)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(assets)
    }

    pub async fn find_by_id(&self, company_id: Uuid, id: Uuid) -> Result<Option<Asset>, AppError> {
        let asset = sqlx::query_as::<_, Asset>(
            "SELECT * FROM assets WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(asset)
    }

    /// Lê o ativo travando a linha (`FOR UPDATE`) até o fim da transação do chamador.
    /// Dois Check-Outs concorrentes do mesmo ativo ficam serializados aqui.
    pub async fn lock_for_update<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Asset>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            SELECT * FROM assets
            WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL
            FOR UPDATE
            "#,
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(executor)
        .await?;

        Ok(asset)
    }

    pub async fn create_asset<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        asset: &NewAsset,
    ) -> Result<Asset, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                company_id, name, asset_type, status, serial_number, manufacturer,
                model, purchase_date, purchase_price, location, nfc_id, description, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&asset.name)
        .bind(asset.asset_type)
        .bind(asset.status)
        .bind(&asset.serial_number)
        .bind(&asset.manufacturer)
        .bind(&asset.model)
        .bind(asset.purchase_date)
        .bind(asset.purchase_price)
        .bind(&asset.location)
        .bind(&asset.nfc_id)
        .bind(&asset.description)
        .bind(&asset.image_url)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)
    }

    // Edição direta (allow-list). Se o status sair de "Checked Out",
    // a atribuição é limpa no mesmo UPDATE para manter o CHECK da tabela.
    // Opcionais: $N::bool diz se a chave veio no payload, o valor pode ser NULL.
    pub async fn update_asset(
        &self,
        company_id: Uuid,
        id: Uuid,
        changes: &UpdateAssetPayload,
    ) -> Result<Option<Asset>, AppError> {
        sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                name = COALESCE($3, name),
                asset_type = COALESCE($4, asset_type),
                status = COALESCE($5, status),
                assigned_to = CASE
                    WHEN $5::asset_status IS NOT NULL AND $5::asset_status <> 'Checked Out' THEN NULL
                    ELSE assigned_to
                END,
                serial_number = CASE WHEN $6::bool THEN $7 ELSE serial_number END,
                manufacturer = CASE WHEN $8::bool THEN $9 ELSE manufacturer END,
                model = CASE WHEN $10::bool THEN $11 ELSE model END,
                purchase_date = CASE WHEN $12::bool THEN $13 ELSE purchase_date END,
                purchase_price = CASE WHEN $14::bool THEN $15 ELSE purchase_price END,
                location = CASE WHEN $16::bool THEN $17 ELSE location END,
                nfc_id = CASE WHEN $18::bool THEN $19 ELSE nfc_id END,
                description = CASE WHEN $20::bool THEN $21 ELSE description END,
                image_url = CASE WHEN $22::bool THEN $23 ELSE image_url END,
                updated_at = NOW()
            WHERE id = $1 AND company_id = $2 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(&changes.name)
        .bind(changes.asset_type)
        .bind(changes.status)
        .bind(changes.serial_number.is_some())
        .bind(changes.serial_number.clone().flatten())
        .bind(changes.manufacturer.is_some())
        .bind(changes.manufacturer.clone().flatten())
        .bind(changes.model.is_some())
        .bind(changes.model.clone().flatten())
        .bind(changes.purchase_date.is_some())
        .bind(changes.purchase_date.flatten())
        .bind(changes.purchase_price.is_some())
        .bind(changes.purchase_price.flatten())
        .bind(changes.location.is_some())
        .bind(changes.location.clone().flatten())
        .bind(changes.nfc_id.is_some())
        .bind(changes.nfc_id.clone().flatten())
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .bind(changes.image_url.is_some())
        .bind(changes.image_url.clone().flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    /// Soft delete. Um ativo emprestado precisa voltar (Check-In) antes de sair do inventário.
    pub async fn soft_delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let Some(asset) = self.lock_for_update(&mut *tx, company_id, id).await? else {
            return Ok(false);
        };
        if asset.status == AssetStatus::CheckedOut {
            return Err(AppError::Conflict(
                "Asset is checked out. Check it in before deleting it.".to_string(),
            ));
        }

        sqlx::query("UPDATE assets SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(asset.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Aplica o novo estado calculado pelo Transaction Engine (status + atribuição).
    pub async fn apply_transition<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        status: AssetStatus,
        assigned_to: Option<Uuid>,
    ) -> Result<Asset, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let asset = sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET status = $3, assigned_to = $4, updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(status)
        .bind(assigned_to)
        .fetch_one(executor)
        .await?;

        Ok(asset)
    }
}
