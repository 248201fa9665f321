// src/models/asset.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "asset_type")]
pub enum AssetType {
    Laptop,
    Monitor,
    Keyboard,
    Mouse,
    Phone,
    Tablet,
    Other,
}

// Os nomes com espaço são os mesmos no banco (enum do Postgres) e no JSON.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "asset_status")]
pub enum AssetStatus {
    Available,
    #[serde(rename = "Checked Out")]
    #[sqlx(rename = "Checked Out")]
    CheckedOut,
    #[serde(rename = "In Repair")]
    #[sqlx(rename = "In Repair")]
    InRepair,
    Lost,
    Retired,
    Maintenance,
}

// Representa um ativo vindo do banco de dados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub status: AssetStatus,

    // Só é preenchido quando status = "Checked Out"
    pub assigned_to: Option<Uuid>,

    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    #[schema(value_type = Option<f64>, example = 1299.90)]
    pub purchase_price: Option<Decimal>,
    pub location: Option<String>,
    pub nfc_id: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssetListQuery {
    /// Substring do nome ou do número de série
    pub search: Option<String>,
    pub status: Option<AssetStatus>,
    /// Opcional; se vier, precisa ser a empresa da sessão
    pub company_id: Option<Uuid>,
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("purchasePrice must not be negative.".into());
        return Err(err);
    }
    Ok(())
}

// "Checked Out" só nasce de uma transação de Check-Out.
fn validate_direct_status(status: &AssetStatus) -> Result<(), ValidationError> {
    if *status == AssetStatus::CheckedOut {
        let mut err = ValidationError::new("checked_out_requires_transaction");
        err.message = Some("status 'Checked Out' can only be set by a Check-Out transaction.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateAsset
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetPayload {
    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    #[schema(example = "MacBook Pro 14")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    #[validate(required(message = "type is required"))]
    pub asset_type: Option<AssetType>,

    #[validate(custom(function = "validate_direct_status"))]
    pub status: Option<AssetStatus>,

    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = Option<f64>)]
    pub purchase_price: Option<Decimal>,

    pub location: Option<String>,
    pub nfc_id: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Campos validados, prontos para o INSERT.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub name: String,
    pub asset_type: AssetType,
    pub status: AssetStatus,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub location: Option<String>,
    pub nfc_id: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl CreateAssetPayload {
    pub fn into_new_asset(self) -> Result<NewAsset, validator::ValidationErrors> {
        self.validate()?;

        let (Some(name), Some(asset_type)) = (self.name, self.asset_type) else {
            // validate() já garantiu os obrigatórios
            let mut errors = validator::ValidationErrors::new();
            errors.add("name", ValidationError::new("required"));
            return Err(errors);
        };

        Ok(NewAsset {
            name,
            asset_type,
            status: self.status.unwrap_or(AssetStatus::Available),
            serial_number: self.serial_number,
            manufacturer: self.manufacturer,
            model: self.model,
            purchase_date: self.purchase_date,
            purchase_price: self.purchase_price,
            location: self.location,
            nfc_id: self.nfc_id,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

// Allow-list de campos editáveis. `assignedTo` não está aqui de propósito:
// atribuição só muda via Transaction Engine.
// Campos opcionais: ausente = não mexe, `null` = limpa.
#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_price"))]
pub struct UpdateAssetPayload {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    #[validate(custom(function = "validate_direct_status"))]
    pub status: Option<AssetStatus>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<NaiveDate>, nullable)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<f64>, nullable)]
    pub purchase_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub nfc_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "explicit_null")]
    #[schema(value_type = Option<String>, nullable)]
    pub image_url: Option<Option<String>>,
}

// Só é chamado quando a chave está presente: `null` vira Some(None).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_update_price(payload: &UpdateAssetPayload) -> Result<(), ValidationError> {
    match &payload.purchase_price {
        Some(Some(price)) => validate_not_negative(price),
        _ => Ok(()),
    }
}

impl UpdateAssetPayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.asset_type.is_none()
            && self.status.is_none()
            && self.serial_number.is_none()
            && self.manufacturer.is_none()
            && self.model.is_none()
            && self.purchase_date.is_none()
            && self.purchase_price.is_none()
            && self.location.is_none()
            && self.nfc_id.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_names_match_the_wire_format() {
        assert_eq!(serde_json::to_value(AssetStatus::CheckedOut).unwrap(), json!("Checked Out"));
        assert_eq!(serde_json::to_value(AssetStatus::InRepair).unwrap(), json!("In Repair"));
        let parsed: AssetStatus = serde_json::from_value(json!("Maintenance")).unwrap();
        assert_eq!(parsed, AssetStatus::Maintenance);
    }

    #[test]
    fn create_requires_name_and_type() {
        let payload: CreateAssetPayload = serde_json::from_value(json!({ "name": "Dell U2720Q" })).unwrap();
        let errors = payload.into_new_asset().unwrap_err();
        assert!(errors.field_errors().keys().any(|k| k == "asset_type" || k == "type"));
    }

    #[test]
    fn create_defaults_to_available() {
        let payload: CreateAssetPayload = serde_json::from_value(json!({
            "name": "ThinkPad X1",
            "type": "Laptop",
            "serialNumber": "SN-1",
            "purchasePrice": 1500.5
        }))
        .unwrap();

        let asset = payload.into_new_asset().unwrap();
        assert_eq!(asset.status, AssetStatus::Available);
        assert_eq!(asset.asset_type, AssetType::Laptop);
        assert_eq!(asset.serial_number.as_deref(), Some("SN-1"));
    }

    #[test]
    fn direct_edits_cannot_check_out() {
        let payload: UpdateAssetPayload = serde_json::from_value(json!({ "status": "Checked Out" })).unwrap();
        assert!(payload.validate().is_err());

        let payload: UpdateAssetPayload = serde_json::from_value(json!({ "status": "In Repair" })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn explicit_null_clears_and_absence_keeps() {
        let payload: UpdateAssetPayload =
            serde_json::from_value(json!({ "location": null, "nfcId": "TAG-9" })).unwrap();

        assert_eq!(payload.location, Some(None));
        assert_eq!(payload.nfc_id, Some(Some("TAG-9".to_string())));
        assert!(payload.description.is_none());
        assert!(!payload.is_empty());
    }

    #[test]
    fn negative_price_update_is_rejected() {
        let payload: UpdateAssetPayload = serde_json::from_value(json!({ "purchasePrice": -1 })).unwrap();
        assert!(payload.validate().is_err());

        let cleared: UpdateAssetPayload = serde_json::from_value(json!({ "purchasePrice": null })).unwrap();
        assert!(cleared.validate().is_ok());
    }

    #[test]
    fn assignment_is_not_an_editable_field() {
        let result: Result<UpdateAssetPayload, _> =
            serde_json::from_value(json!({ "assignedTo": Uuid::new_v4() }));
        assert!(result.is_err());
    }

    #[test]
    fn negative_prices_are_rejected() {
        let payload: CreateAssetPayload = serde_json::from_value(json!({
            "name": "Mouse",
            "type": "Mouse",
            "purchasePrice": -1
        }))
        .unwrap();
        assert!(payload.into_new_asset().is_err());
    }
}
