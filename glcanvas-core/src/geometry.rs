//! Static geometry uploaded once at startup.

/// The eight cube corners, three floats each.
#[rustfmt::skip]
pub const CUBE_POSITIONS: [f32; 3 * 8] = [
    -1.0,  1.0,  1.0,   -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,    1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,   -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,    1.0,  1.0, -1.0,
];

/// Per-corner colors of the plain cube.
#[rustfmt::skip]
pub const CUBE_COLORS: [f32; 3 * 8] = [
    0.0, 1.0, 1.0,   0.0, 0.0, 1.0,
    1.0, 0.0, 1.0,   1.0, 1.0, 1.0,
    0.0, 1.0, 0.0,   0.0, 0.0, 0.0,
    1.0, 0.0, 0.0,   1.0, 1.0, 0.0,
];

/// Per-corner colors of the textured cube. The first two channels double as texture
/// coordinates.
#[rustfmt::skip]
pub const TEXTURED_CUBE_COLORS: [f32; 3 * 8] = [
    0.0, 1.0, 1.0,   0.0, 0.0, 1.0,
    1.0, 0.0, 1.0,   1.0, 1.0, 1.0,
    0.0, 1.0, 0.0,   0.0, 0.0, 0.5,
    1.0, 0.0, 0.0,   1.0, 1.0, 0.5,
];

/// Twelve triangles, two per face.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 3 * 12] = [
    3, 2, 6, 6, 7, 3,
    4, 5, 1, 1, 0, 4,
    4, 0, 3, 3, 7, 4,
    1, 5, 6, 6, 2, 1,
    0, 1, 2, 2, 3, 0,
    7, 6, 5, 5, 4, 7,
];

/// A quad covering normalized device coordinates, two floats per corner.
#[rustfmt::skip]
pub const QUAD_POSITIONS: [f32; 2 * 4] = [
    -1.0, -1.0,
     1.0, -1.0,
     1.0,  1.0,
    -1.0,  1.0,
];

#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 2,
    0, 2, 3,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_cube_indices_reference_existing_corners() {
        assert!(CUBE_INDICES.iter().all(|&i| (i as usize) < CUBE_POSITIONS.len() / 3));
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_POSITIONS.len() / 2));
    }

    #[test]
    fn test_each_face_is_a_planar_quad() {
        for face in CUBE_INDICES.chunks(6) {
            let corners: HashSet<u32> = face.iter().copied().collect();
            assert_eq!(corners.len(), 4, "face {face:?}");

            // All four corners share one coordinate.
            let shared = (0..3).any(|axis| {
                let values: HashSet<i32> = corners
                    .iter()
                    .map(|&c| CUBE_POSITIONS[c as usize * 3 + axis] as i32)
                    .collect();
                values.len() == 1
            });
            assert!(shared, "face {face:?}");
        }
    }

    #[test]
    fn test_every_corner_is_used() {
        let used: HashSet<u32> = CUBE_INDICES.iter().copied().collect();
        assert_eq!(used.len(), 8);
    }
}
