//! Boundary topologies and out-of-bounds coordinate resolution.
//!
//! A boundary mode is modelled as two independent per-axis concerns:
//! does the axis wrap, and does crossing it an odd number of times
//! mirror the other coordinate. The nine supported modes are the
//! compositions of those flags. `resolve` reduces a possibly
//! out-of-bounds coordinate into the grid, or reports absence, which
//! callers treat as a dead cell.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boundary topology of the grid.
///
/// The serialized form uses the wire-stable camelCase tokens
/// (`plane`, `cylinderX`, ..., `projectivePlane`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Boundary {
    #[default]
    Plane,
    CylinderX,
    CylinderY,
    Torus,
    MobiusX,
    MobiusY,
    KleinX,
    KleinY,
    ProjectivePlane,
}

impl Boundary {
    pub const ALL: [Boundary; 9] = [
        Boundary::Plane,
        Boundary::CylinderX,
        Boundary::CylinderY,
        Boundary::Torus,
        Boundary::MobiusX,
        Boundary::MobiusY,
        Boundary::KleinX,
        Boundary::KleinY,
        Boundary::ProjectivePlane,
    ];

    /// Whether the X axis wraps.
    #[must_use]
    pub fn wraps_x(self) -> bool {
        matches!(
            self,
            Boundary::CylinderX
                | Boundary::Torus
                | Boundary::MobiusX
                | Boundary::KleinX
                | Boundary::KleinY
                | Boundary::ProjectivePlane
        )
    }

    /// Whether the Y axis wraps.
    #[must_use]
    pub fn wraps_y(self) -> bool {
        matches!(
            self,
            Boundary::CylinderY
                | Boundary::Torus
                | Boundary::MobiusY
                | Boundary::KleinX
                | Boundary::KleinY
                | Boundary::ProjectivePlane
        )
    }

    /// Whether crossing the X boundary an odd number of times mirrors Y.
    #[must_use]
    pub fn x_cross_flips_y(self) -> bool {
        matches!(
            self,
            Boundary::MobiusX | Boundary::KleinX | Boundary::ProjectivePlane
        )
    }

    /// Whether crossing the Y boundary an odd number of times mirrors X.
    #[must_use]
    pub fn y_cross_flips_x(self) -> bool {
        matches!(
            self,
            Boundary::MobiusY | Boundary::KleinY | Boundary::ProjectivePlane
        )
    }

    /// Maps a requested coordinate to an in-bounds cell, or `None` when
    /// the coordinate falls off a non-wrapping edge.
    ///
    /// A single call may wrap several times along each axis (extended
    /// neighborhoods reach two cells out); the mirror is applied on the
    /// *parity* of the wrap count, not on whether a wrap occurred.
    #[must_use]
    pub fn resolve(
        self,
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        let w = width as i64;
        let h = height as i64;
        let mut wx = 0;
        let mut wy = 0;

        let mut x = x;
        let mut y = y;
        if x < 0 || x >= w {
            if !self.wraps_x() {
                return None;
            }
            wx = x.div_euclid(w);
            x = x.rem_euclid(w);
        }
        if y < 0 || y >= h {
            if !self.wraps_y() {
                return None;
            }
            wy = y.div_euclid(h);
            y = y.rem_euclid(h);
        }

        if wx.rem_euclid(2) != 0 && self.x_cross_flips_y() {
            y = h - 1 - y;
        }
        if wy.rem_euclid(2) != 0 && self.y_cross_flips_x() {
            x = w - 1 - x;
        }

        Some((x as usize, y as usize))
    }

    /// Canonical wire token for this mode.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Boundary::Plane => "plane",
            Boundary::CylinderX => "cylinderX",
            Boundary::CylinderY => "cylinderY",
            Boundary::Torus => "torus",
            Boundary::MobiusX => "mobiusX",
            Boundary::MobiusY => "mobiusY",
            Boundary::KleinX => "kleinX",
            Boundary::KleinY => "kleinY",
            Boundary::ProjectivePlane => "projectivePlane",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Boundary {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Boundary::ALL
            .into_iter()
            .find(|b| b.token() == s)
            .ok_or_else(|| anyhow::anyhow!("unrecognized boundary token '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_absent_off_every_edge() {
        let b = Boundary::Plane;
        assert_eq!(b.resolve(-1, 0, 5, 5), None);
        assert_eq!(b.resolve(5, 0, 5, 5), None);
        assert_eq!(b.resolve(0, -1, 5, 5), None);
        assert_eq!(b.resolve(0, 5, 5, 5), None);
        assert_eq!(b.resolve(2, 3, 5, 5), Some((2, 3)));
    }

    #[test]
    fn test_torus_wraps_both_axes() {
        let b = Boundary::Torus;
        assert_eq!(b.resolve(-1, -1, 5, 5), Some((4, 4)));
        assert_eq!(b.resolve(5, 5, 5, 5), Some((0, 0)));
        assert_eq!(b.resolve(6, -2, 5, 5), Some((1, 3)));
    }

    #[test]
    fn test_cylinder_x_open_in_y() {
        let b = Boundary::CylinderX;
        assert_eq!(b.resolve(-1, 2, 5, 5), Some((4, 2)));
        assert_eq!(b.resolve(2, -1, 5, 5), None);
        assert_eq!(b.resolve(2, 5, 5, 5), None);
    }

    #[test]
    fn test_mobius_x_flips_y_on_odd_crossings() {
        let b = Boundary::MobiusX;
        // One crossing to the right mirrors y.
        assert_eq!(b.resolve(5, 1, 5, 4), Some((0, 2)));
        // One crossing to the left mirrors y as well.
        assert_eq!(b.resolve(-1, 0, 5, 4), Some((4, 3)));
        // Two crossings restore y: +2 on a width-1 strip.
        assert_eq!(b.resolve(2, 1, 1, 4), Some((0, 1)));
        // A single crossing on the same strip mirrors.
        assert_eq!(b.resolve(1, 1, 1, 4), Some((0, 2)));
    }

    #[test]
    fn test_mobius_x_does_not_wrap_y() {
        assert_eq!(Boundary::MobiusX.resolve(2, -1, 5, 5), None);
    }

    #[test]
    fn test_klein_x_wraps_y_without_flip() {
        let b = Boundary::KleinX;
        // Crossing Y wraps but does not mirror X.
        assert_eq!(b.resolve(2, -1, 5, 5), Some((2, 4)));
        // Crossing X wraps and mirrors Y.
        assert_eq!(b.resolve(-1, 1, 5, 5), Some((4, 3)));
    }

    #[test]
    fn test_projective_plane_flips_both() {
        let b = Boundary::ProjectivePlane;
        assert_eq!(b.resolve(-1, 1, 5, 5), Some((4, 3)));
        assert_eq!(b.resolve(1, -1, 5, 5), Some((3, 4)));
        // Crossing both axes once applies both mirrors.
        assert_eq!(b.resolve(-1, -1, 5, 5), Some((0, 0)));
    }

    #[test]
    fn test_double_wrap_parity_is_even() {
        // A +2 offset on a width-1 projective plane wraps twice: no flip.
        let b = Boundary::ProjectivePlane;
        assert_eq!(b.resolve(2, 1, 1, 4), Some((0, 1)));
        assert_eq!(b.resolve(-2, 1, 1, 4), Some((0, 1)));
    }

    #[test]
    fn test_token_round_trip() {
        for b in Boundary::ALL {
            assert_eq!(b.token().parse::<Boundary>().unwrap(), b);
        }
        assert!("donut".parse::<Boundary>().is_err());
    }

    #[test]
    fn test_serde_tokens_are_wire_stable() {
        let json = serde_json::to_string(&Boundary::ProjectivePlane).unwrap();
        assert_eq!(json, "\"projectivePlane\"");
        let json = serde_json::to_string(&Boundary::CylinderX).unwrap();
        assert_eq!(json, "\"cylinderX\"");
    }
}
