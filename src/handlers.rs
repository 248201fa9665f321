pub mod assets;
pub mod auth;
pub mod companies;
pub mod dashboard;
pub mod employees;
pub mod transactions;
