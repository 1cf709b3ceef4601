//! Line-of-flight checks between cells
//!
//! A hop travels in a straight line. The line is rasterized with a simple
//! DDA walk and every interior cell it crosses is inspected; a tree anywhere
//! along the way blocks the shot.

use glam::Vec2;

use super::geometry::Position;
use super::terrain::Course;

/// Whether the straight line from `start` to `end` avoids blocking terrain.
///
/// Walks `max(|dx|, |dy|)` equal steps and samples the interior points
/// (both endpoints excluded), rounding half-up to the nearest cell. A
/// zero-length path is always clear. Samples outside the course never
/// block; callers bounds-filter destinations before asking.
pub fn is_path_clear(start: Position, end: Position, course: &Course) -> bool {
    let delta = end.as_ivec2() - start.as_ivec2();
    let steps = delta.x.abs().max(delta.y.abs());
    if steps == 0 {
        return true;
    }

    let origin = start.as_ivec2().as_vec2();
    let step = delta.as_vec2() / steps as f32;

    (1..steps).all(|i| {
        let sample = origin + step * i as f32;
        let cell = Position::from((sample + Vec2::splat(0.5)).floor().as_ivec2());
        !course.terrain_at(cell).is_some_and(|t| t.blocks_path())
    })
}

/// Whether the ball is on the flag or any of its eight neighbours
#[inline]
pub fn is_near_flag(ball: Position, flag: Position) -> bool {
    ball.chebyshev_distance(flag) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::TerrainType;
    use proptest::prelude::*;

    fn open_course() -> Course {
        Course::filled(8, 12, TerrainType::Grass)
    }

    #[test]
    fn test_tree_between_points_blocks() {
        let mut course = open_course();
        let start = Position::new(4, 10);
        let end = Position::new(4, 4);
        course.set(Position::new(4, 7), TerrainType::Tree);
        assert!(!is_path_clear(start, end, &course));

        course.set(Position::new(4, 7), TerrainType::Grass);
        assert!(is_path_clear(start, end, &course));
    }

    #[test]
    fn test_diagonal_tree_blocks() {
        let mut course = open_course();
        course.set(Position::new(3, 8), TerrainType::Tree);
        assert!(!is_path_clear(Position::new(1, 10), Position::new(5, 6), &course));
        // Same tree is off the line for a straight hop
        assert!(is_path_clear(Position::new(1, 10), Position::new(1, 6), &course));
    }

    #[test]
    fn test_water_and_sand_do_not_block() {
        let course = Course::from_rows(&[
            "........",
            "..~~:...",
            "........",
        ]);
        assert!(is_path_clear(Position::new(0, 1), Position::new(6, 1), &course));
    }

    #[test]
    fn test_endpoints_are_not_sampled() {
        let course = Course::from_rows(&["#...#"]);
        assert!(is_path_clear(Position::new(0, 0), Position::new(4, 0), &course));
        assert!(is_path_clear(Position::new(0, 0), Position::new(1, 0), &course));
    }

    #[test]
    fn test_off_axis_line_rounds_half_up() {
        // (0,0) -> (4,2): step (1, 0.5); i=1 samples (1, 0.5) -> (1, 1)
        let mut course = Course::filled(5, 3, TerrainType::Grass);
        course.set(Position::new(1, 1), TerrainType::Tree);
        assert!(!is_path_clear(Position::new(0, 0), Position::new(4, 2), &course));

        let mut course = Course::filled(5, 3, TerrainType::Grass);
        course.set(Position::new(1, 0), TerrainType::Tree);
        assert!(is_path_clear(Position::new(0, 0), Position::new(4, 2), &course));
    }

    #[test]
    fn test_near_flag_neighbourhood() {
        let flag = Position::new(4, 2);
        for dx in -1..=1 {
            for dy in -1..=1 {
                assert!(is_near_flag(Position::new(4 + dx, 2 + dy), flag));
            }
        }
        assert!(!is_near_flag(Position::new(6, 2), flag));
        assert!(!is_near_flag(Position::new(4, 4), flag));
        assert!(!is_near_flag(Position::new(2, 0), flag));
    }

    proptest! {
        #[test]
        fn prop_zero_length_path_is_clear(
            x in 0..8i32,
            y in 0..12i32,
            trees in proptest::collection::vec((0..8i32, 0..12i32), 0..40),
        ) {
            let mut course = open_course();
            for (tx, ty) in trees {
                course.set(Position::new(tx, ty), TerrainType::Tree);
            }
            let p = Position::new(x, y);
            prop_assert!(is_path_clear(p, p, &course));
        }

        #[test]
        fn prop_near_flag_is_chebyshev_one(
            bx in -3..11i32, by in -3..15i32,
            fx in 0..8i32, fy in 0..12i32,
        ) {
            let ball = Position::new(bx, by);
            let flag = Position::new(fx, fy);
            let expected = (bx - fx).abs() <= 1 && (by - fy).abs() <= 1;
            prop_assert_eq!(is_near_flag(ball, flag), expected);
        }
    }
}
