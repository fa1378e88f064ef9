//! Unit conversions between the form and the model.
//!
//! The form collects metric areas, whereas the model has been trained on square feet.

pub const SQUARE_FEET_PER_SQUARE_METER: f64 = 10.7639;

#[must_use]
#[inline]
pub fn square_meters_to_square_feet(square_meters: f64) -> f64 {
    square_meters * SQUARE_FEET_PER_SQUARE_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_meters_to_square_feet_ok() {
        for x in [0.0, 1.0, 5.0, 100.0, 500.0, 1234.5] {
            assert!((square_meters_to_square_feet(x) - x * 10.7639).abs() < 1e-9);
        }
        assert!((square_meters_to_square_feet(100.0) - 1076.39).abs() < 1e-9);
    }
}
