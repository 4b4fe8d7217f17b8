//! World-to-grid coordinate transform.
//!
//! One grid cell is 2.0 world units and the grid is centered on the origin.
//! Grid row 0 is the top row, engine y grows upward.

/// Round half up: ties go toward +infinity, for negative values too.
///
/// Differs from `f64::round` only on negative exact ties (-0.5 -> 0, not -1).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Unrounded column of world `x` on a grid `width` cells wide
pub fn raw_col(x: f64, width: i32) -> f64 {
    x / 2.0 + (width - 1) as f64 / 2.0
}

/// Unrounded row of world `y` on a grid `height` cells tall
pub fn raw_row(y: f64, height: i32) -> f64 {
    -y / 2.0 + (height - 1) as f64 / 2.0
}

/// Grid `(row, col)` of a world position
pub fn world_to_grid(x: f64, y: f64, width: i32, height: i32) -> (i32, i32) {
    (
        round_half_up(raw_row(y, height)),
        round_half_up(raw_col(x, width)),
    )
}

/// Whether a raw coordinate lies exactly between two cells
pub fn is_half_cell(raw: f64) -> bool {
    (raw - raw.floor() - 0.5).abs() < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(-1.6), -2);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_world_to_grid_center_of_even_grid() {
        // (0, 0) on a 5x6 grid: col 2.0, row 2.5 which rounds up
        assert_eq!(world_to_grid(0.0, 0.0, 5, 6), (3, 2));
    }

    #[test]
    fn test_world_to_grid_corners() {
        // 4x4 grid: cell centers at -3, -1, 1, 3
        assert_eq!(world_to_grid(-3.0, 3.0, 4, 4), (0, 0));
        assert_eq!(world_to_grid(3.0, -3.0, 4, 4), (3, 3));
        assert_eq!(world_to_grid(-1.0, 1.0, 4, 4), (1, 1));
    }

    #[test]
    fn test_world_to_grid_on_odd_grid() {
        // 2.5 / 2 + 3 = 4.25
        assert_eq!(world_to_grid(2.5, 0.0, 7, 7).1, round_half_up(2.5 / 2.0 + 3.0));
        assert_eq!(world_to_grid(2.5, 0.0, 7, 7), (3, 4));
        // 1.0 / 2 + 3 = 3.5, a tie
        assert_eq!(world_to_grid(1.0, 0.0, 7, 7).1, 4);
        assert_eq!(world_to_grid(-1.0, 0.0, 7, 7).1, 3);
    }

    #[test]
    fn test_is_half_cell() {
        assert!(is_half_cell(raw_row(0.0, 6)));
        assert!(is_half_cell(-0.5));
        assert!(!is_half_cell(raw_row(1.0, 6)));
        assert!(!is_half_cell(3.0));
    }
}
