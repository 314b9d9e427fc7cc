//! Time-related types for NFL seasons and scoring weeks.

use crate::error::{Result, SleeperError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Last regular-season scoring week.
pub const LAST_REGULAR_WEEK: u16 = 18;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u16>()
            .map(Self)
            .map_err(|_| SleeperError::InvalidId {
                value: s.to_string(),
            })
    }
}

/// Type-safe wrapper for Week numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, de-duplicated set of weeks parsed from an argument like
/// `1-4,6,8-10`.
///
/// ```rust
/// use sleeper_ffl::cli::types::WeekSpec;
///
/// let spec: WeekSpec = "1-3,5".parse().unwrap();
/// let weeks: Vec<u16> = spec.weeks().iter().map(|w| w.as_u16()).collect();
/// assert_eq!(weeks, vec![1, 2, 3, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSpec(Vec<Week>);

impl WeekSpec {
    /// Weeks `1..=through`.
    pub fn through(through: u16) -> Self {
        Self((1..=through).map(Week::new).collect())
    }

    pub fn weeks(&self) -> &[Week] {
        &self.0
    }

    pub fn into_weeks(self) -> Vec<Week> {
        self.0
    }
}

impl Default for WeekSpec {
    fn default() -> Self {
        Self::through(LAST_REGULAR_WEEK)
    }
}

impl fmt::Display for WeekSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|w| w.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for WeekSpec {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| SleeperError::InvalidWeekSpec {
            spec: s.to_string(),
            reason: reason.to_string(),
        };
        let parse_week = |part: &str| -> Result<u16> {
            let week = part
                .trim()
                .parse::<u16>()
                .map_err(|_| invalid("not a number"))?;
            if week == 0 {
                return Err(invalid("weeks start at 1"));
            }
            Ok(week)
        };

        let mut weeks = Vec::new();
        for part in s.split(',').filter(|p| !p.trim().is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse_week(start)?, parse_week(end)?);
                    if start > end {
                        return Err(invalid("range start after end"));
                    }
                    weeks.extend((start..=end).map(Week::new));
                }
                None => weeks.push(Week::new(parse_week(part)?)),
            }
        }

        if weeks.is_empty() {
            return Err(invalid("no weeks given"));
        }
        weeks.sort();
        weeks.dedup();
        Ok(Self(weeks))
    }
}
