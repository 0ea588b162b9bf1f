use crate::{Falloff, Linear};

/// Multiplier tuples (xx, xy, yx, yy) that map the scanned octant onto the
/// other seven.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Recursive shadowcasting over an abstract grid.
///
/// The caster holds no map data of its own. It reads the world through the
/// `is_blocking(x, y)` callback, which must return true for every
/// sight-blocking cell, out-of-bounds cells included, and reports visible
/// cells through the `light(x, y, intensity)` callback. Cells on an octant
/// seam are reported once per octant that scans them, so `light` must
/// tolerate repeated calls for the same cell. The intensity for a cell is a
/// pure function of its distance, later calls repeat the same value.
///
/// The scan starts at distance one, so the origin cell itself is never
/// reported. Callers that want it lit record it before casting.
///
/// ```
/// use fov::ShadowCaster;
///
/// let mut lit = std::collections::HashSet::new();
/// let mut caster = ShadowCaster::new(
///     |_, _| false,
///     |x, y, _| {
///         lit.insert((x, y));
///     },
/// );
/// caster.calculate_light(0, 0, 3);
///
/// assert!(lit.contains(&(1, 0)));
/// assert!(lit.contains(&(-2, 2)));
/// // Cells at exactly the radius are already out of range.
/// assert!(!lit.contains(&(3, 0)));
/// // The origin is the caller's to seed.
/// assert!(!lit.contains(&(0, 0)));
/// ```
pub struct ShadowCaster<B, L, F = Linear> {
    is_blocking: B,
    light: L,
    falloff: F,
}

impl<B, L> ShadowCaster<B, L>
where
    B: FnMut(i32, i32) -> bool,
    L: FnMut(i32, i32, f32),
{
    pub fn new(is_blocking: B, light: L) -> Self {
        ShadowCaster {
            is_blocking,
            light,
            falloff: Linear,
        }
    }
}

impl<B, L, F> ShadowCaster<B, L, F>
where
    B: FnMut(i32, i32) -> bool,
    L: FnMut(i32, i32, f32),
    F: Falloff,
{
    /// Construct a caster with a custom light attenuation policy.
    pub fn with_falloff(is_blocking: B, light: L, falloff: F) -> Self {
        ShadowCaster {
            is_blocking,
            light,
            falloff,
        }
    }

    /// Light every cell visible from the origin within the given radius.
    ///
    /// Reusable, the caster keeps no state between calls.
    pub fn calculate_light(&mut self, origin_x: i32, origin_y: i32, radius: i32) {
        assert!(radius >= 0, "negative field of view radius");
        for (xx, xy, yx, yy) in OCTANTS {
            self.cast_octant(origin_x, origin_y, 1, 1.0, 0.0, radius, xx, xy, yx, yy);
        }
    }

    /// Scan one octant from `row` outward, between `start_slope` and
    /// `end_slope`.
    #[allow(clippy::too_many_arguments)]
    fn cast_octant(
        &mut self,
        cx: i32,
        cy: i32,
        row: i32,
        mut start_slope: f32,
        end_slope: f32,
        radius: i32,
        xx: i32,
        xy: i32,
        yx: i32,
        yy: i32,
    ) {
        if start_slope < end_slope {
            return;
        }

        let radius2 = radius * radius;

        for j in row..=radius {
            let dy = -j;
            let mut blocked = false;
            let mut resume_slope = start_slope;

            for dx in -j..=0 {
                // Slopes to the bottom-right and top-left corners of the
                // cell.
                let l_slope = (dx as f32 - 0.5) / (dy as f32 + 0.5);
                let r_slope = (dx as f32 + 0.5) / (dy as f32 - 0.5);

                if start_slope < r_slope {
                    continue;
                } else if end_slope > l_slope {
                    break;
                }

                let map_x = cx + dx * xx + dy * xy;
                let map_y = cy + dx * yx + dy * yy;

                let dist2 = dx * dx + dy * dy;
                if dist2 < radius2 {
                    let intensity = self.falloff.intensity(dist2, radius2);
                    (self.light)(map_x, map_y, intensity);
                }

                if blocked {
                    if (self.is_blocking)(map_x, map_y) {
                        // Still scanning a blocking run, push the resumption
                        // point onward.
                        resume_slope = r_slope;
                        continue;
                    }
                    blocked = false;
                    start_slope = resume_slope;
                } else if j < radius && (self.is_blocking)(map_x, map_y) {
                    // Entered a blocking run. A child scan covers the rows
                    // behind it with the cone narrowed to this cell's left
                    // edge.
                    blocked = true;
                    self.cast_octant(
                        cx, cy, j + 1, start_slope, l_slope, radius, xx, xy, yx, yy,
                    );
                    resume_slope = r_slope;
                }
            }

            // A row that ends blocked shadows everything behind it, the
            // child scans already cover the open gaps.
            if blocked {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    /// Cast in a string map, `#` blocks sight, `@` marks the origin.
    ///
    /// The origin is not seeded into the result, what comes back is exactly
    /// what the caster reported.
    fn cast(map: &[&str], radius: i32) -> HashMap<(i32, i32), f32> {
        let mut origin = None;
        let mut walls = HashSet::new();
        for (y, row) in map.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let pos = (x as i32, y as i32);
                match c {
                    '#' => {
                        walls.insert(pos);
                    }
                    '@' => {
                        origin = Some(pos);
                    }
                    _ => {}
                }
            }
        }
        let (ox, oy) = origin.expect("map has no origin");

        let mut lightmap = HashMap::new();
        let mut caster = ShadowCaster::new(
            |x, y| walls.contains(&(x, y)),
            |x, y, intensity| {
                lightmap.insert((x, y), intensity);
            },
        );
        caster.calculate_light(ox, oy, radius);
        lightmap
    }

    #[test]
    fn open_field() {
        let lit = cast(
            &[
                ".....", //
                ".....",
                "..@..",
                ".....",
                ".....",
            ],
            10,
        );

        for y in 0..5 {
            for x in 0..5 {
                if (x, y) == (2, 2) {
                    continue;
                }
                assert!(lit.contains_key(&(x, y)), "({x}, {y}) is dark");
            }
        }

        // Linear falloff, 1 - d2/r2.
        assert!((lit[&(2, 1)] - 0.99).abs() < 1e-6);
        assert!((lit[&(0, 0)] - 0.92).abs() < 1e-6);
    }

    #[test]
    fn origin_is_not_self_lit() {
        let lit = cast(&["...", ".@.", "..."], 10);
        assert!(!lit.contains_key(&(1, 1)));
    }

    #[test]
    fn small_radii() {
        // The distance check is strict, so radius 1 reaches nothing and
        // radius 2 reaches only the 8 neighbors.
        assert!(cast(&["...", ".@.", "..."], 0).is_empty());
        assert!(cast(&["...", ".@.", "..."], 1).is_empty());
        assert_eq!(cast(&["...", ".@.", "..."], 2).len(), 8);
    }

    #[test]
    fn strict_radius_boundary() {
        let map = [
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
            ".....@.....",
            "...........",
            "...........",
            "...........",
            "...........",
            "...........",
        ];
        let lit = cast(&map, 3);

        // dist2 8 is in, dist2 9 is out.
        assert!(lit.contains_key(&(7, 7)));
        assert!(!lit.contains_key(&(8, 5)));
        assert!(!lit.contains_key(&(5, 2)));

        for (&(x, y), _) in &lit {
            let (dx, dy) = (x - 5, y - 5);
            assert!(dx * dx + dy * dy < 9);
        }
    }

    #[test]
    fn pillar_shadow() {
        let lit = cast(
            &[
                ".....", //
                ".....",
                "..@#.",
                ".....",
                ".....",
            ],
            10,
        );

        // The pillar itself is visible, the cell behind it is not.
        assert!(lit.contains_key(&(3, 2)));
        assert!(!lit.contains_key(&(4, 2)));

        // Cells beside the shadow stay lit.
        assert!(lit.contains_key(&(3, 1)));
        assert!(lit.contains_key(&(3, 3)));
        assert!(lit.contains_key(&(4, 1)));
        assert!(lit.contains_key(&(4, 3)));
    }

    #[test]
    fn diagonal_shadow() {
        let lit = cast(
            &[
                ".....", //
                ".....",
                "..@..",
                "...#.",
                ".....",
            ],
            10,
        );

        assert!(lit.contains_key(&(3, 3)));
        assert!(!lit.contains_key(&(4, 4)));
        assert!(lit.contains_key(&(3, 4)));
        assert!(lit.contains_key(&(4, 3)));
    }

    #[test]
    fn enclosed_room() {
        let lit = cast(
            &[
                "#######", //
                "#.....#",
                "#.....#",
                "#..@..#",
                "#.....#",
                "#.....#",
                "#######",
            ],
            10,
        );

        // Interior and walls are all visible, nothing leaks past the walls.
        assert_eq!(lit.len(), 7 * 7 - 1);
        for (&(x, y), _) in &lit {
            assert!((0..7).contains(&x) && (0..7).contains(&y));
        }
    }

    #[test]
    fn symmetric_across_octants() {
        let map = [
            ".............",
            ".............",
            ".............",
            ".............",
            "......#......",
            ".............",
            "....#.@.#....",
            ".............",
            "......#......",
            ".............",
            ".............",
            ".............",
            ".............",
        ];
        let lit = cast(&map, 6);

        // The pillar layout is invariant under quarter turns and mirrors,
        // so the lit set must be too.
        let transforms = [
            (1, 0, 0, 1),
            (0, -1, 1, 0),
            (-1, 0, 0, -1),
            (0, 1, -1, 0),
            (-1, 0, 0, 1),
            (1, 0, 0, -1),
            (0, 1, 1, 0),
            (0, -1, -1, 0),
        ];
        for (&(x, y), &intensity) in &lit {
            let (dx, dy) = (x - 6, y - 6);
            for (a, b, c, d) in transforms {
                let image = (6 + dx * a + dy * b, 6 + dx * c + dy * d);
                let mirrored = lit.get(&image).copied();
                assert!(
                    mirrored.is_some(),
                    "({x}, {y}) lit but image {image:?} dark"
                );
                assert!((mirrored.unwrap() - intensity).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn falloff_is_monotonic() {
        let map = [
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
            "......@......",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
            ".............",
        ];
        let lit = cast(&map, 6);

        let mut prev = 1.0;
        for d in 1..=5 {
            let intensity = lit[&(6 + d, 6)];
            let expected = 1.0 - (d * d) as f32 / 36.0;
            assert!((intensity - expected).abs() < 1e-6);
            assert!(intensity > 0.0 && intensity < prev);
            prev = intensity;
        }
    }

    #[test]
    fn flat_falloff() {
        let mut lightmap = HashMap::new();
        let mut caster = ShadowCaster::with_falloff(
            |_, _| false,
            |x, y, intensity| {
                lightmap.insert((x, y), intensity);
            },
            crate::Flat,
        );
        caster.calculate_light(0, 0, 4);

        assert!(!lightmap.is_empty());
        assert!(lightmap.values().all(|&i| i == 1.0));
    }

    #[test]
    fn reusable_across_casts() {
        let mut lightmap = HashMap::new();
        let mut caster = ShadowCaster::new(
            |_, _| false,
            |x, y, intensity| {
                lightmap.insert((x, y), intensity);
            },
        );
        caster.calculate_light(0, 0, 2);
        caster.calculate_light(100, 100, 2);

        assert_eq!(lightmap.len(), 16);
        assert!(lightmap.contains_key(&(0, 1)));
        assert!(lightmap.contains_key(&(100, 101)));
    }

    #[test]
    #[should_panic]
    fn negative_radius() {
        ShadowCaster::new(|_, _| false, |_, _, _| {}).calculate_light(0, 0, -1);
    }
}
