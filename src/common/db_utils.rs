// src/common/db_utils.rs

use crate::common::error::AppError;

// ---
// Helper: traduz violações de UNIQUE do Postgres em Conflict
// ---
/// Nome da constraint (ver migrations) -> campo exposto na API.
fn conflicting_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        "employees_email_key" => Some("email"),
        "employees_employee_code_key" => Some("employeeId"),
        "assets_serial_number_key" => Some("serialNumber"),
        "assets_nfc_id_key" => Some("nfcId"),
        _ => None,
    }
}

/// Converte um `sqlx::Error` em `AppError`, explicando qual campo colidiu
/// quando o erro é uma violação de chave única.
pub(crate) fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            return match conflicting_field(constraint) {
                Some(field) => AppError::Conflict(format!("A record with this {} already exists.", field)),
                None => AppError::Conflict("A record with these values already exists.".to_string()),
            };
        }
    }
    e.into()
}

/// Escapa os curingas do LIKE para que a busca seja por substring literal.
pub(crate) fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
