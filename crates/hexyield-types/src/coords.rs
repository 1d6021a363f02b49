//! Hex grid coordinate types.
//!
//! Tiles are stored by axial `(r, q)` position. Cube coordinates are only
//! used transiently for distance math; conversions live in
//! `hexyield_world::hex`.

use serde::{Deserialize, Serialize};

/// Axial hex coordinate: `r` is the row, `q` the column within the row.
///
/// Ordering is row-major (`r` first, then `q`), which is also the order in
/// which grid generation assigns identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Axial {
    /// Row.
    pub r: i32,
    /// Column.
    pub q: i32,
}

impl Axial {
    /// Create an axial coordinate.
    pub const fn new(r: i32, q: i32) -> Self {
        Self { r, q }
    }
}

impl core::fmt::Display for Axial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.r, self.q)
    }
}

/// Cube hex coordinate with the invariant `x + y + z == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cube {
    /// X axis.
    pub x: i64,
    /// Y axis.
    pub y: i64,
    /// Z axis.
    pub z: i64,
}

impl Cube {
    /// Create a cube coordinate. Callers are responsible for `x + y + z == 0`.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axial_orders_row_major() {
        let mut positions = vec![Axial::new(1, 0), Axial::new(0, 5), Axial::new(0, 2)];
        positions.sort();
        assert_eq!(
            positions,
            vec![Axial::new(0, 2), Axial::new(0, 5), Axial::new(1, 0)]
        );
    }
}
