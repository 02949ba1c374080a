use crate::dataset::RawValue;

/// Separator between the feet and inches parts of a height such as `6-11`
const HEIGHT_SEPARATOR: char = '-';

/// Convert a raw height to total inches
///
/// # Arguments
/// * `raw` - Height cell: numeric (already inches) or a `feet-inches` string
///
/// # Returns
/// * `Some(inches)` for numeric input (unchanged) or a well-formed `F-I` string
/// * `None` when the cell is missing or non-finite, has no separator, or either
///   part is not an unsigned integer
pub fn height_to_inches(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Missing => None,
        RawValue::Numeric(n) if !n.is_finite() => None,
        RawValue::Numeric(n) => Some(*n),
        RawValue::Text(text) => parse_feet_inches(text),
    }
}

fn parse_feet_inches(text: &str) -> Option<f64> {
    if !text.contains(HEIGHT_SEPARATOR) {
        return None;
    }

    let mut parts = text.split(HEIGHT_SEPARATOR);
    let (feet, inches) = match (parts.next(), parts.next(), parts.next()) {
        (Some(feet), Some(inches), None) => (feet, inches),
        _ => return None,
    };

    let feet: u32 = feet.trim().parse().ok()?;
    let inches: u32 = inches.trim().parse().ok()?;
    let total = feet.checked_mul(12)?.checked_add(inches)?;
    Some(f64::from(total))
}

/// Coerce a raw cell to a number, treating anything unparsable as missing
///
/// # Arguments
/// * `raw` - Cell holding a number or numeric-like text
///
/// # Returns
/// * `Some(value)` for finite numbers and text that parses as a finite float
/// * `None` otherwise; never fails
pub fn coerce_numeric(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Missing => return None,
        RawValue::Numeric(n) => *n,
        RawValue::Text(text) => text.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_height_feet_inches() {
        assert_eq!(height_to_inches(&text("6-6")), Some(78.0));
        assert_eq!(height_to_inches(&text("7-0")), Some(84.0));
        assert_eq!(height_to_inches(&text("6-11")), Some(83.0));
        assert_eq!(height_to_inches(&text(" 5 - 9 ")), Some(69.0));
    }

    #[test]
    fn test_height_well_formed_grid() {
        for feet in 0..9u32 {
            for inches in 0..12u32 {
                let raw = text(&format!("{}-{}", feet, inches));
                assert_eq!(height_to_inches(&raw), Some(f64::from(feet * 12 + inches)));
            }
        }
    }

    #[test]
    fn test_height_numeric_passthrough() {
        for value in [0.0, 78.0, 80.5, 1e6] {
            assert_eq!(height_to_inches(&RawValue::Numeric(value)), Some(value));
        }
    }

    #[test]
    fn test_height_is_idempotent() {
        let once = height_to_inches(&text("6-9")).unwrap();
        let twice = height_to_inches(&RawValue::Numeric(once));
        assert_eq!(twice, Some(once));
    }

    #[test]
    fn test_height_missing_and_malformed() {
        assert_eq!(height_to_inches(&RawValue::Missing), None);
        assert_eq!(height_to_inches(&RawValue::Numeric(f64::NAN)), None);
        assert_eq!(height_to_inches(&text("N/A")), None);
        assert_eq!(height_to_inches(&text("78")), None);
        assert_eq!(height_to_inches(&text("abc-def")), None);
        assert_eq!(height_to_inches(&text("6-")), None);
        assert_eq!(height_to_inches(&text("-6")), None);
        assert_eq!(height_to_inches(&text("6-6-6")), None);
        assert_eq!(height_to_inches(&text("6.5-2")), None);
    }

    #[test]
    fn test_height_non_finite_is_missing() {
        assert_eq!(height_to_inches(&RawValue::Numeric(f64::INFINITY)), None);
        assert_eq!(height_to_inches(&RawValue::Numeric(f64::NEG_INFINITY)), None);
        assert_eq!(height_to_inches(&text("inf")), None);
        assert_eq!(height_to_inches(&text("-inf")), None);
    }

    #[test]
    fn test_height_overflow_is_missing() {
        let raw = text(&format!("{}-0", u32::MAX));
        assert_eq!(height_to_inches(&raw), None);
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric(&RawValue::Numeric(215.0)), Some(215.0));
        assert_eq!(coerce_numeric(&text(" 250 ")), Some(250.0));
        assert_eq!(coerce_numeric(&text("190.5")), Some(190.5));
        assert_eq!(coerce_numeric(&text("heavy")), None);
        assert_eq!(coerce_numeric(&text("nan")), None);
        assert_eq!(coerce_numeric(&RawValue::Missing), None);
    }

    #[test]
    fn test_coerce_non_finite_is_missing() {
        assert_eq!(coerce_numeric(&text("inf")), None);
        assert_eq!(coerce_numeric(&text("-inf")), None);
        assert_eq!(coerce_numeric(&text("infinity")), None);
        assert_eq!(coerce_numeric(&RawValue::Numeric(f64::INFINITY)), None);
    }
}
