//! Scoring format selection for projected points.

use std::fmt;

/// Which Sleeper projection column to optimize against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScoringFormat {
    /// Full point per reception
    Ppr,
    /// Half point per reception
    Half,
    /// Standard (no reception points)
    Std,
}

impl ScoringFormat {
    /// Pick the format matching a league's points-per-reception setting.
    pub fn from_reception_points(rec: f64) -> Self {
        if rec >= 0.75 {
            ScoringFormat::Ppr
        } else if rec >= 0.25 {
            ScoringFormat::Half
        } else {
            ScoringFormat::Std
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoringFormat::Ppr => "PPR",
            ScoringFormat::Half => "Half PPR",
            ScoringFormat::Std => "Standard",
        };
        write!(f, "{}", s)
    }
}
