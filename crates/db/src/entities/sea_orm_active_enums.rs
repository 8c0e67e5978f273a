//! Postgres enum mappings and their conversions to domain enums.

use finreport_core::company::{CompanySize as DomainSize, Industry as DomainIndustry};
use finreport_core::metrics::MetricStatus as DomainStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "industry")]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    #[sea_orm(string_value = "trade")]
    Trade,
    #[sea_orm(string_value = "manufacturing")]
    Manufacturing,
    #[sea_orm(string_value = "services")]
    Services,
    #[sea_orm(string_value = "it")]
    It,
    #[sea_orm(string_value = "construction")]
    Construction,
    #[sea_orm(string_value = "finance")]
    Finance,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "company_size")]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    #[sea_orm(string_value = "small")]
    Small,
    #[sea_orm(string_value = "medium")]
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "metric_status")]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    #[sea_orm(string_value = "good")]
    Good,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "bad")]
    Bad,
}

impl From<DomainIndustry> for Industry {
    fn from(value: DomainIndustry) -> Self {
        match value {
            DomainIndustry::Trade => Self::Trade,
            DomainIndustry::Manufacturing => Self::Manufacturing,
            DomainIndustry::Services => Self::Services,
            DomainIndustry::It => Self::It,
            DomainIndustry::Construction => Self::Construction,
            DomainIndustry::Finance => Self::Finance,
            DomainIndustry::Other => Self::Other,
        }
    }
}

impl From<DomainSize> for CompanySize {
    fn from(value: DomainSize) -> Self {
        match value {
            DomainSize::Small => Self::Small,
            DomainSize::Medium => Self::Medium,
        }
    }
}

impl From<DomainStatus> for MetricStatus {
    fn from(value: DomainStatus) -> Self {
        match value {
            DomainStatus::Good => Self::Good,
            DomainStatus::Warning => Self::Warning,
            DomainStatus::Bad => Self::Bad,
        }
    }
}

impl From<MetricStatus> for DomainStatus {
    fn from(value: MetricStatus) -> Self {
        match value {
            MetricStatus::Good => Self::Good,
            MetricStatus::Warning => Self::Warning,
            MetricStatus::Bad => Self::Bad,
        }
    }
}
