//! Fantasy football position types and utilities.

use crate::error::SleeperError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fantasy football player positions the optimizer drafts for.
///
/// # Examples
///
/// ```rust
/// use sleeper_ffl::Position;
///
/// let def: Position = "D/ST".parse().unwrap();
/// assert_eq!(def, Position::DEF);
/// assert_eq!(def.to_string(), "DEF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DEF,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::K,
        Position::DEF,
    ];
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DEF => "DEF",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Position {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(Position::QB),
            "RB" => Ok(Position::RB),
            "WR" => Ok(Position::WR),
            "TE" => Ok(Position::TE),
            "K" => Ok(Position::K),
            "DEF" | "D/ST" | "DST" => Ok(Position::DEF),
            _ => Err(SleeperError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

/// A league roster slot as Sleeper lists it in `roster_positions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSlot {
    /// Dedicated starter slot for one position
    Starter(Position),
    /// RB/WR/TE
    Flex,
    /// QB/RB/WR/TE
    SuperFlex,
    /// WR/TE
    RecFlex,
    /// WR/RB
    WrRbFlex,
    /// Bench, any position
    Bench,
    /// Slots the optimizer never fills (IDP and friends)
    Other(String),
}

impl RosterSlot {
    /// Positions that may occupy this slot.
    pub fn eligible_positions(&self) -> &'static [Position] {
        match self {
            RosterSlot::Starter(Position::QB) => &[Position::QB],
            RosterSlot::Starter(Position::RB) => &[Position::RB],
            RosterSlot::Starter(Position::WR) => &[Position::WR],
            RosterSlot::Starter(Position::TE) => &[Position::TE],
            RosterSlot::Starter(Position::K) => &[Position::K],
            RosterSlot::Starter(Position::DEF) => &[Position::DEF],
            RosterSlot::Flex => &[Position::RB, Position::WR, Position::TE],
            RosterSlot::SuperFlex => &[Position::QB, Position::RB, Position::WR, Position::TE],
            RosterSlot::RecFlex => &[Position::WR, Position::TE],
            RosterSlot::WrRbFlex => &[Position::WR, Position::RB],
            RosterSlot::Bench => &Position::ALL,
            RosterSlot::Other(_) => &[],
        }
    }
}

impl FromStr for RosterSlot {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slot = match s.trim().to_uppercase().as_str() {
            "FLEX" => RosterSlot::Flex,
            "SUPER_FLEX" => RosterSlot::SuperFlex,
            "REC_FLEX" => RosterSlot::RecFlex,
            "WRRB_FLEX" | "WRRB_WRT" => RosterSlot::WrRbFlex,
            "BN" | "BE" | "BENCH" => RosterSlot::Bench,
            other => match other.parse::<Position>() {
                Ok(pos) => RosterSlot::Starter(pos),
                Err(_) => RosterSlot::Other(other.to_string()),
            },
        };
        Ok(slot)
    }
}

/// A single `POS=N` override for the position bounds.
///
/// ```rust
/// use sleeper_ffl::cli::types::PositionBound;
/// use sleeper_ffl::Position;
///
/// let bound: PositionBound = "qb=2".parse().unwrap();
/// assert_eq!(bound.position, Position::QB);
/// assert_eq!(bound.count, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionBound {
    pub position: Position,
    pub count: usize,
}

impl FromStr for PositionBound {
    type Err = SleeperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SleeperError::InvalidBound {
            bound: s.to_string(),
        };
        let (pos, count) = s.split_once('=').ok_or_else(invalid)?;
        Ok(Self {
            position: pos.parse().map_err(|_| invalid())?,
            count: count.trim().parse().map_err(|_| invalid())?,
        })
    }
}
