//! Company profile enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CompanyError;

/// Industry a company operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    /// Retail and wholesale trade.
    Trade,
    /// Manufacturing.
    Manufacturing,
    /// Services.
    Services,
    /// Information technology.
    It,
    /// Construction.
    Construction,
    /// Finance.
    Finance,
    /// Anything else.
    Other,
}

impl Industry {
    /// Returns the industry as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Manufacturing => "manufacturing",
            Self::Services => "services",
            Self::It => "it",
            Self::Construction => "construction",
            Self::Finance => "finance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = CompanyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trade" => Ok(Self::Trade),
            "manufacturing" => Ok(Self::Manufacturing),
            "services" => Ok(Self::Services),
            "it" => Ok(Self::It),
            "construction" => Ok(Self::Construction),
            "finance" => Ok(Self::Finance),
            "other" => Ok(Self::Other),
            _ => Err(CompanyError::UnknownIndustry(s.to_string())),
        }
    }
}

/// Company size class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    /// Small business.
    #[default]
    Small,
    /// Medium business.
    Medium,
}

impl CompanySize {
    /// Returns the size as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanySize {
    type Err = CompanyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            _ => Err(CompanyError::UnknownSize(s.to_string())),
        }
    }
}

/// Validated company profile fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyProfile {
    /// Company name.
    pub name: String,
    /// Normalized INN.
    pub inn: String,
    /// Industry.
    pub industry: Industry,
    /// Size class.
    pub size: CompanySize,
    /// Description.
    pub description: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
}
