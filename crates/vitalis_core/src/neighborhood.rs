//! Lattice neighborhood templates.
//!
//! Square lattices use fixed offset templates. Hexagonal lattices use
//! offset ("odd-r") coordinates, where rows with odd `y` are shifted
//! half a cell right, so the template depends on the row parity of the
//! center cell. The extended hexagonal template adds the twelve
//! distance-two ring cells, converted to odd-r offsets per parity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const VON_NEUMANN: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

const EXTENDED_MOORE: [(i32, i32); 24] = [
    (-2, -2),
    (-1, -2),
    (0, -2),
    (1, -2),
    (2, -2),
    (-2, -1),
    (-1, -1),
    (0, -1),
    (1, -1),
    (2, -1),
    (-2, 0),
    (-1, 0),
    (1, 0),
    (2, 0),
    (-2, 1),
    (-1, 1),
    (0, 1),
    (1, 1),
    (2, 1),
    (-2, 2),
    (-1, 2),
    (0, 2),
    (1, 2),
    (2, 2),
];

// Odd-r inner ring. Even rows reach up-left, odd rows up-right.
const HEX_EVEN: [(i32, i32); 6] = [(-1, -1), (0, -1), (-1, 0), (1, 0), (-1, 1), (0, 1)];
const HEX_ODD: [(i32, i32); 6] = [(0, -1), (1, -1), (-1, 0), (1, 0), (0, 1), (1, 1)];

// Inner ring plus the axial distance-two ring mapped to odd-r offsets.
const HEX_EXT_EVEN: [(i32, i32); 18] = [
    (-1, -1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (2, 0),
    (1, -1),
    (1, -2),
    (0, -2),
    (-1, -2),
    (-2, -1),
    (-2, 0),
    (-2, 1),
    (-1, 2),
    (0, 2),
    (1, 2),
    (1, 1),
];
const HEX_EXT_ODD: [(i32, i32); 18] = [
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (0, 1),
    (1, 1),
    (2, 0),
    (2, -1),
    (1, -2),
    (0, -2),
    (-1, -2),
    (-1, -1),
    (-2, 0),
    (-1, 1),
    (-1, 2),
    (0, 2),
    (1, 2),
    (2, 1),
];

/// Neighborhood template selector.
///
/// The serialized form uses the wire-stable camelCase tokens
/// (`moore`, `vonNeumann`, `extendedMoore`, `hexagonal`,
/// `extendedHexagonal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Neighborhood {
    #[default]
    Moore,
    VonNeumann,
    ExtendedMoore,
    Hexagonal,
    ExtendedHexagonal,
}

impl Neighborhood {
    pub const ALL: [Neighborhood; 5] = [
        Neighborhood::Moore,
        Neighborhood::VonNeumann,
        Neighborhood::ExtendedMoore,
        Neighborhood::Hexagonal,
        Neighborhood::ExtendedHexagonal,
    ];

    /// Number of cells in the template; also the highest neighbor count
    /// the rule masks are indexed by.
    #[must_use]
    pub fn max_count(self) -> u32 {
        match self {
            Neighborhood::Moore => 8,
            Neighborhood::VonNeumann => 4,
            Neighborhood::ExtendedMoore => 24,
            Neighborhood::Hexagonal => 6,
            Neighborhood::ExtendedHexagonal => 18,
        }
    }

    /// Offset template for a center cell on the given row.
    ///
    /// Row parity only matters on the hexagonal lattices.
    #[must_use]
    pub fn offsets(self, row: usize) -> &'static [(i32, i32)] {
        let odd = row % 2 == 1;
        match self {
            Neighborhood::Moore => &MOORE,
            Neighborhood::VonNeumann => &VON_NEUMANN,
            Neighborhood::ExtendedMoore => &EXTENDED_MOORE,
            Neighborhood::Hexagonal => {
                if odd {
                    &HEX_ODD
                } else {
                    &HEX_EVEN
                }
            }
            Neighborhood::ExtendedHexagonal => {
                if odd {
                    &HEX_EXT_ODD
                } else {
                    &HEX_EXT_EVEN
                }
            }
        }
    }

    /// Canonical wire token for this template.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Neighborhood::Moore => "moore",
            Neighborhood::VonNeumann => "vonNeumann",
            Neighborhood::ExtendedMoore => "extendedMoore",
            Neighborhood::Hexagonal => "hexagonal",
            Neighborhood::ExtendedHexagonal => "extendedHexagonal",
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Neighborhood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Neighborhood::ALL
            .into_iter()
            .find(|n| n.token() == s)
            .ok_or_else(|| anyhow::anyhow!("unrecognized neighborhood token '{s}'"))
    }
}
