//! Planar point and polyline arithmetic.
//!
//! Branch paths are straight-segment polylines, so everything the length
//! engine needs reduces to the handful of pure functions in this module.

use serde::{Deserialize, Serialize};

/// A position on the harness drawing board, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The drawing-board origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Anything that occupies a single point on the board.
///
/// Lets the polyline functions run directly over branch path points without
/// first copying their coordinates out.
pub trait Positioned {
    /// The point this item sits at.
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// Error returned when a geometric query needs at least one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("geometry operation requires at least one point")]
pub struct EmptyInputError;

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance_to(&p2)
}

/// Total length of the polyline through `points`.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
pub fn polyline_length<P: Positioned>(points: &[P]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(pair[0].position(), pair[1].position()))
        .sum()
}

/// Finds the point closest to `target`.
///
/// Returns the index of that point together with its distance. Ties go to
/// the earliest index.
///
/// # Errors
///
/// Returns [`EmptyInputError`] if `points` is empty.
pub fn nearest_point_index<P: Positioned>(
    points: &[P],
    target: Point,
) -> Result<(usize, f64), EmptyInputError> {
    points
        .iter()
        .map(|point| distance(point.position(), target))
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, d)| match best {
            // strict comparison keeps the first of equally distant points
            Some((_, best_distance)) if d >= best_distance => best,
            _ => Some((index, d)),
        })
        .ok_or(EmptyInputError)
}

/// Length of the polyline prefix `points[0..=index]`.
///
/// An index beyond the last point measures the whole polyline.
#[must_use]
pub fn length_to_index<P: Positioned>(points: &[P], index: usize) -> f64 {
    let end = index.saturating_add(1).min(points.len());
    polyline_length(&points[..end])
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test_case(&[]; "no points")]
    #[test_case(&[(4.0, 2.0)]; "single point")]
    fn degenerate_polylines_have_zero_length(coords: &[(f64, f64)]) {
        assert!(polyline_length(&points(coords)).abs() < f64::EPSILON);
    }

    #[test]
    fn polyline_length_sums_segments() {
        let path = points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        assert!((polyline_length(&path) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn polyline_length_is_direction_independent() {
        let mut path = points(&[(1.5, -2.0), (7.25, 3.0), (-4.0, 11.0), (0.0, 0.0)]);
        let forward = polyline_length(&path);
        path.reverse();
        let backward = polyline_length(&path);

        assert!(forward >= 0.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn nearest_point_rejects_empty_input() {
        let empty: Vec<Point> = Vec::new();
        assert_eq!(
            nearest_point_index(&empty, Point::ORIGIN),
            Err(EmptyInputError)
        );
    }

    #[test]
    fn nearest_point_finds_minimum() {
        let path = points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let (index, d) = nearest_point_index(&path, Point::new(9.0, 1.0)).unwrap();
        assert_eq!(index, 1);
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn nearest_point_ties_go_to_earliest_index() {
        let path = points(&[(-1.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        let (index, _) = nearest_point_index(&path, Point::ORIGIN).unwrap();
        assert_eq!(index, 0);
    }

    #[test_case(0, 0.0; "first point")]
    #[test_case(1, 3.0; "middle point")]
    #[test_case(2, 7.0; "last point")]
    #[test_case(9, 7.0; "past the end")]
    fn length_to_index_measures_prefix(index: usize, expected: f64) {
        let path = points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        assert!((length_to_index(&path, index) - expected).abs() < 1e-12);
    }
}
