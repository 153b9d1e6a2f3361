//! Domain models for CPU load estimation

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target runtime platform, scaling the heuristic execution times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    SoftDpacWindows,
    SoftDpacLinux,
    HardDpacM262,
    HardDpacM251,
    #[default]
    Unknown,
}

impl Platform {
    /// Relative execution-time factor versus the Windows soft dPAC baseline
    pub fn factor(&self) -> f64 {
        match self {
            Self::SoftDpacWindows => 1.0,
            Self::SoftDpacLinux => 0.9,
            Self::HardDpacM262 => 1.2,
            Self::HardDpacM251 => 1.5,
            Self::Unknown => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SoftDpacWindows => "soft-dpac-windows",
            Self::SoftDpacLinux => "soft-dpac-linux",
            Self::HardDpacM262 => "hard-dpac-m262",
            Self::HardDpacM251 => "hard-dpac-m251",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft-dpac-windows" => Ok(Self::SoftDpacWindows),
            "soft-dpac-linux" => Ok(Self::SoftDpacLinux),
            "hard-dpac-m262" => Ok(Self::HardDpacM262),
            "hard-dpac-m251" => Ok(Self::HardDpacM251),
            "unknown" => Ok(Self::Unknown),
            other => Err(format!(
                "unknown platform '{}' (expected one of: soft-dpac-windows, soft-dpac-linux, hard-dpac-m262, hard-dpac-m251, unknown)",
                other
            )),
        }
    }
}

/// Heuristic cost of one ST algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmCost {
    pub fb_name: String,
    pub algorithm: String,
    /// Simplified cyclomatic complexity (1 + decision keywords)
    pub complexity: usize,
    /// Estimated execution time in microseconds, platform-unadjusted
    pub estimated_us: f64,
    pub st_lines: usize,
}

impl AlgorithmCost {
    pub fn key(&self) -> String {
        format!("{}.{}", self.fb_name, self.algorithm)
    }
}

/// Aggregate load classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoadStatus {
    Safe,
    Warning,
    Critical,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Safe => "Ample CPU headroom available.",
            Self::Warning => "Moderate CPU load. Monitor under real load conditions.",
            Self::Critical => "High CPU load. Optimize algorithms or distribute to multiple resources.",
        }
    }
}
