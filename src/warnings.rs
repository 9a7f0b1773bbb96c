//! Inline validation for note size defaults.
//!
//! Size defaults typed by the user are bounded to
//! [`MIN_SIZE_INPUT`, `MAX_SIZE_INPUT`]. An out-of-range value is rejected and
//! reported with a message; it never reaches the board. This is separate from
//! the resize floor, which clamps instead of rejecting.

/// Lowest accepted size default.
pub const MIN_SIZE_INPUT: f64 = 150.0;
/// Highest accepted size default.
pub const MAX_SIZE_INPUT: f64 = 700.0;

/// Why a size input was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Value below the lower bound.
    BelowMinimum { value: f64, min: f64 },
    /// Value above the upper bound.
    AboveMaximum { value: f64, max: f64 },
    /// Value is not a finite number.
    NotANumber,
}

/// Check a size input against the default bounds.
///
/// # Returns
/// The value itself when accepted, otherwise the violated bound
pub fn check_size_input(value: f64) -> Result<f64, Warning> {
    check_bounds(value, MIN_SIZE_INPUT, MAX_SIZE_INPUT)
}

/// Check `value` against an arbitrary inclusive range.
fn check_bounds(value: f64, min: f64, max: f64) -> Result<f64, Warning> {
    if !value.is_finite() {
        return Err(Warning::NotANumber);
    }
    if value < min {
        return Err(Warning::BelowMinimum { value, min });
    }
    if value > max {
        return Err(Warning::AboveMaximum { value, max });
    }
    Ok(value)
}

/// Format a warning for display.
pub fn format_warning(warning: &Warning) -> String {
    match warning {
        Warning::BelowMinimum { min, .. } => format!("Value cannot be less than {}", min),
        Warning::AboveMaximum { max, .. } => format!("Value cannot be greater than {}", max),
        Warning::NotANumber => "Value must be a number".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(check_size_input(150.0), Ok(150.0));
        assert_eq!(check_size_input(700.0), Ok(700.0));
        assert_eq!(check_size_input(320.5), Ok(320.5));
    }

    #[test]
    fn test_below_minimum() {
        match check_size_input(149.0) {
            Err(Warning::BelowMinimum { value, min }) => {
                assert_eq!(value, 149.0);
                assert_eq!(min, MIN_SIZE_INPUT);
            }
            other => panic!("Expected BelowMinimum warning, got {:?}", other),
        }
    }

    #[test]
    fn test_above_maximum() {
        assert!(matches!(
            check_size_input(701.0),
            Err(Warning::AboveMaximum { .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        assert_eq!(check_size_input(f64::NAN), Err(Warning::NotANumber));
    }

    #[test]
    fn test_format_messages() {
        let low = check_size_input(20.0).unwrap_err();
        let high = check_size_input(9000.0).unwrap_err();
        assert_eq!(format_warning(&low), "Value cannot be less than 150");
        assert_eq!(format_warning(&high), "Value cannot be greater than 700");
    }
}
