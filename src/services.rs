pub mod auth;
pub mod employee_service;
pub mod transaction_service;
