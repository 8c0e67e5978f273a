//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every company-scoped query filters on the owner, so another owner's rows
//! behave as missing.

pub mod company;
pub mod financial_period;
pub mod metric_set;
pub mod user;

pub use company::{CompanyRepository, CompanyRepositoryError, UpdateCompanyInput};
pub use financial_period::{CreatePeriodInput, FinancialPeriodRepository, PeriodRepositoryError};
pub use metric_set::MetricSetRepository;
pub use user::UserRepository;
