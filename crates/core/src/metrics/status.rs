//! Benchmark classification of key ratios.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Qualitative label for a ratio against its benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    /// At or above the good threshold.
    Good,
    /// At or above the warning threshold.
    Warning,
    /// Below the warning threshold.
    Bad,
}

impl MetricStatus {
    /// Returns the status as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(Self::Good),
            "warning" => Ok(Self::Warning),
            "bad" => Ok(Self::Bad),
            _ => Err(format!("Unknown metric status: {s}")),
        }
    }
}

/// Lower bounds of the good and warning bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benchmark {
    /// Values at or above this are good.
    pub good: Decimal,
    /// Values at or above this (and below `good`) are warning.
    pub warning: Decimal,
}

impl Benchmark {
    /// Classifies a value, checking the good band first.
    #[must_use]
    pub fn classify(&self, value: Decimal) -> MetricStatus {
        if value >= self.good {
            MetricStatus::Good
        } else if value >= self.warning {
            MetricStatus::Warning
        } else {
            MetricStatus::Bad
        }
    }
}

const fn whole(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 0)
}

const fn tenths(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 1)
}

/// Ratios that carry a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassifiedMetric {
    /// Gross margin, %.
    GrossMargin,
    /// Return on sales, %.
    Ros,
    /// Return on assets, %.
    Roa,
    /// Return on equity, %.
    Roe,
    /// Current ratio.
    Liquidity,
}

impl ClassifiedMetric {
    /// All classified metrics, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::GrossMargin,
        Self::Ros,
        Self::Roa,
        Self::Roe,
        Self::Liquidity,
    ];

    /// Returns the benchmark bands for this metric.
    #[must_use]
    pub const fn benchmark(self) -> Benchmark {
        match self {
            Self::GrossMargin => Benchmark {
                good: whole(30),
                warning: whole(20),
            },
            Self::Ros => Benchmark {
                good: whole(10),
                warning: whole(5),
            },
            Self::Roa => Benchmark {
                good: whole(5),
                warning: whole(2),
            },
            Self::Roe => Benchmark {
                good: whole(15),
                warning: whole(10),
            },
            Self::Liquidity => Benchmark {
                good: tenths(15),
                warning: tenths(10),
            },
        }
    }

    /// Classifies a value of this metric.
    #[must_use]
    pub fn classify(self, value: Decimal) -> MetricStatus {
        self.benchmark().classify(value)
    }

    /// Key used in status maps.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::GrossMargin => "gross_margin",
            Self::Ros => "ros",
            Self::Roa => "roa",
            Self::Roe => "roe",
            Self::Liquidity => "liquidity",
        }
    }
}
