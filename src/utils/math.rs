//! # Grid Geometry
//!
//! Line tracing used by the vision and line-of-fire tests.

use crate::Coord;

/// Traces a Bresenham line from `from` to `to`, both endpoints included.
///
/// The line is generated starting at `from`, so tracing in the opposite
/// direction may pick different cells on ambiguous diagonals.
///
/// # Examples
///
/// ```
/// use tactica::{line_between, Coord};
///
/// let line = line_between(Coord::new(0, 0), Coord::new(3, 0));
/// assert_eq!(line.len(), 4);
/// assert_eq!(line[0], Coord::new(0, 0));
/// assert_eq!(line[3], Coord::new(3, 0));
/// ```
pub fn line_between(from: Coord, to: Coord) -> Vec<Coord> {
    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut line = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        // Never negative: every step moves towards `to`, which is unsigned.
        line.push(Coord::new(x as usize, y as usize));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    line
}

/// Returns true if every cell strictly between `from` and `to` passes
/// `is_clear`. The endpoints themselves are not tested.
pub fn line_is_clear<F>(from: Coord, to: Coord, mut is_clear: F) -> bool
where
    F: FnMut(Coord) -> bool,
{
    let line = line_between(from, to);
    if line.len() <= 2 {
        return true;
    }
    line[1..line.len() - 1].iter().all(|&coord| is_clear(coord))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_line() {
        let c = Coord::new(4, 4);
        assert_eq!(line_between(c, c), vec![c]);
    }

    #[test]
    fn test_diagonal_line() {
        let line = line_between(Coord::new(0, 0), Coord::new(3, 3));
        assert_eq!(
            line,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 1),
                Coord::new(2, 2),
                Coord::new(3, 3)
            ]
        );
    }

    #[test]
    fn test_line_towards_origin() {
        let line = line_between(Coord::new(3, 2), Coord::new(0, 0));
        assert_eq!(line.first(), Some(&Coord::new(3, 2)));
        assert_eq!(line.last(), Some(&Coord::new(0, 0)));
        assert_eq!(line.len(), 4);
    }

    #[test]
    fn test_steep_line_is_contiguous() {
        let line = line_between(Coord::new(1, 0), Coord::new(2, 6));
        assert_eq!(line.len(), 7);
        for pair in line.windows(2) {
            assert!(pair[0].x.abs_diff(pair[1].x) <= 1);
            assert!(pair[0].y.abs_diff(pair[1].y) <= 1);
        }
    }

    #[test]
    fn test_line_is_clear_ignores_endpoints() {
        let from = Coord::new(0, 0);
        let to = Coord::new(2, 0);
        assert!(line_is_clear(from, to, |c| c != from && c != to));
        assert!(!line_is_clear(from, to, |c| c != Coord::new(1, 0)));
        assert!(line_is_clear(from, Coord::new(1, 0), |_| false));
    }
}
