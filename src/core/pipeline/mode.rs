//! Operation modes and their parsing.

use crate::error::DedupError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One full-tree pass. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Report visually similar pairs
    Similar,
    /// Give every image its canonical name, quarantining duplicates
    Rename,
    /// Gather every image into `<root>/~unsorted`
    Move,
    /// Bucket every image by the first character of its name
    Organize,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Similar, Mode::Rename, Mode::Move, Mode::Organize];

    /// Parse `rename+similar`-style lists; `all` selects every mode.
    /// The result is deduplicated and in execution order.
    pub fn parse_list(list: &str) -> Result<Vec<Mode>, DedupError> {
        let mut modes = BTreeSet::new();

        for part in list.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("all") {
                modes.extend(Mode::ALL);
            } else {
                modes.insert(part.parse::<Mode>()?);
            }
        }

        if modes.is_empty() {
            return Err(DedupError::Config(format!("No mode given in '{}'", list)));
        }

        Ok(modes.into_iter().collect())
    }
}

impl FromStr for Mode {
    type Err = DedupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "similar" => Ok(Mode::Similar),
            "rename" => Ok(Mode::Rename),
            "move" => Ok(Mode::Move),
            "organize" => Ok(Mode::Organize),
            other => Err(DedupError::Config(format!(
                "Unknown mode '{}' (expected rename, move, organize, similar or all)",
                other
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Similar => write!(f, "similar"),
            Mode::Rename => write!(f, "rename"),
            Mode::Move => write!(f, "move"),
            Mode::Organize => write!(f, "organize"),
        }
    }
}
