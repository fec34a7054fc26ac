use daedal_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible on a unit-cost grid with axis moves only, which makes it the
/// A* heuristic of choice here.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
