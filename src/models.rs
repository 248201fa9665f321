pub mod asset;
pub mod auth;
pub mod company;
pub mod dashboard;
pub mod employee;
pub mod transaction;
