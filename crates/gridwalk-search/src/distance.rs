use gridwalk_core::Point;

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    (a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()
}

/// Euclidean (L2) distance between two points.
///
/// Never exceeds the Manhattan distance, so it is an admissible estimate for
/// 4-directional unit-cost moves.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let goal = Point::new(4, 4);
        for x in -3..8 {
            for y in -3..8 {
                let p = Point::new(x, y);
                assert!(euclidean(p, goal) <= f64::from(manhattan(p, goal)) + 1e-9);
            }
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(4, 4)), 8);
        assert_eq!(euclidean(Point::new(0, 0), Point::new(3, 4)), 5.0);
        assert_eq!(euclidean(Point::new(2, 2), Point::new(2, 2)), 0.0);
    }
}
