//! Status-code selectors.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects candidates by the leading letter of their status code.
///
/// Each variant is a prefix-anchored pattern over `statusflag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFlag {
    /// Period-related statistics: codes starting with `P`.
    PeriodRelated,
    /// Radius-related statistics: codes starting with `P` or `R`.
    RadiusRelated,
    /// Radius-disposition statistics: codes starting with `R`.
    RDispositionRelated,
}

impl StatusFlag {
    /// Regular expression matched against the start of the status code.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::PeriodRelated => r"^P.*",
            Self::RadiusRelated => r"^[PR].*",
            Self::RDispositionRelated => r"^R.*",
        }
    }

    /// Get the selector name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PeriodRelated => "period-related",
            Self::RadiusRelated => "radius-related",
            Self::RDispositionRelated => "r-disposition-related",
        }
    }

    /// Compile the selector.
    pub fn matcher(&self) -> Result<StatusMatcher> {
        Ok(StatusMatcher {
            regex: Regex::new(self.pattern())?,
        })
    }
}

impl fmt::Display for StatusFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatusFlag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "period" | "period-related" | "p" => Ok(Self::PeriodRelated),
            "radius" | "radius-related" | "pr" => Ok(Self::RadiusRelated),
            "r-disposition" | "r-disposition-related" | "disposition" | "r" => {
                Ok(Self::RDispositionRelated)
            }
            other => Err(format!(
                "unknown status flag '{}' (expected period, radius or r-disposition)",
                other
            )),
        }
    }
}

/// A compiled [`StatusFlag`].
#[derive(Debug, Clone)]
pub struct StatusMatcher {
    regex: Regex,
}

impl StatusMatcher {
    /// Check a status code; a missing code never matches.
    pub fn is_match(&self, statusflag: Option<&str>) -> bool {
        statusflag.is_some_and(|s| self.regex.is_match(s))
    }
}
