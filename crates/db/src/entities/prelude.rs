//! Entity re-exports.

pub use super::companies::Entity as Companies;
pub use super::financial_periods::Entity as FinancialPeriods;
pub use super::metric_sets::Entity as MetricSets;
pub use super::users::Entity as Users;
