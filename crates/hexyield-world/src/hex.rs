//! Hex coordinate math: storage/cube conversion, distance, and neighbors.
//!
//! Tiles are stored by `(r, q)` where odd rows sit half a hex to the right
//! of even rows. Converting to cube coordinates uses
//! `x = q - floor(r / 2)`, `z = r`, `y = -x - z`; floor (not truncation)
//! keeps negative rows consistent. Distance is the Chebyshev metric in cube
//! space.
//!
//! The six neighbor directions are axial steps. They are applied in cube
//! space and mapped back to storage coordinates, so every neighbor is
//! exactly one step away regardless of row parity.
//!
//! This deliberately differs from adding each `(dr, dq)` to `(r, q)`
//! directly, which would put some neighbors two steps away. On an even
//! row the upward pair shifts one column left: the tile at `(4, 4)`
//! borders `(3, 3)` and `(3, 4)`, not `(3, 4)` and `(3, 5)`.

use hexyield_types::{Axial, Cube, Tile};

/// Neighbor directions as `(dr, dq)` axial steps, in the fixed order used
/// for area-effect folding.
pub const HEX_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (0, 1), (-1, 1)];

/// Convert a storage position to cube coordinates.
pub fn axial_to_cube(position: Axial) -> Cube {
    let r = i64::from(position.r);
    let q = i64::from(position.q);
    let x = q - r.div_euclid(2);
    let z = r;
    Cube::new(x, -x - z, z)
}

/// Convert cube coordinates back to a storage position.
///
/// Returns `None` if the result does not fit an [`Axial`].
pub fn cube_to_axial(cube: Cube) -> Option<Axial> {
    let r = i32::try_from(cube.z).ok()?;
    let q = i32::try_from(cube.x.checked_add(cube.z.div_euclid(2))?).ok()?;
    Some(Axial::new(r, q))
}

/// Chebyshev distance between two cube coordinates.
pub const fn cube_distance(a: Cube, b: Cube) -> u64 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let dz = a.z.abs_diff(b.z);
    let xy = if dx > dy { dx } else { dy };
    if xy > dz { xy } else { dz }
}

/// Hex distance between two tiles.
pub fn distance(a: &Tile, b: &Tile) -> u64 {
    position_distance(a.position(), b.position())
}

/// Hex distance between two storage positions.
pub fn position_distance(a: Axial, b: Axial) -> u64 {
    cube_distance(axial_to_cube(a), axial_to_cube(b))
}

/// The positions adjacent to `position`, in [`HEX_DIRECTIONS`] order.
///
/// Positions that would overflow the coordinate range are skipped.
pub fn neighbor_positions(position: Axial) -> impl Iterator<Item = Axial> {
    let origin = axial_to_cube(position);
    HEX_DIRECTIONS.iter().filter_map(move |&(dr, dq)| {
        let dr = i64::from(dr);
        let dq = i64::from(dq);
        cube_to_axial(Cube::new(origin.x + dq, origin.y - dq - dr, origin.z + dr))
    })
}
