pub mod asset_repo;
pub use asset_repo::{AssetFilter, AssetRepository};
pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod employee_repo;
pub use employee_repo::{EmployeeFilter, EmployeeRepository};
pub mod transaction_repo;
pub use transaction_repo::TransactionRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
