//! CLI argument validators.

use crate::constants::confidence::{MAX, MIN};

/// Parse and validate a top-guess threshold (0.0-1.0).
pub fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(MIN..=MAX).contains(&value) {
        return Err(format!(
            "threshold must be between {MIN} and {MAX}, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate a model input size in pixels.
pub fn parse_input_size(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid pixel size"))?;

    if value == 0 {
        return Err("input size must be at least 1 pixel".to_string());
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold_valid() {
        assert_eq!(parse_threshold("0.7").ok(), Some(0.7));
        assert_eq!(parse_threshold("0").ok(), Some(0.0));
        assert_eq!(parse_threshold("1.0").ok(), Some(1.0));
    }

    #[test]
    fn test_parse_threshold_invalid() {
        assert!(parse_threshold("1.01").is_err());
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("high").unwrap_err().contains("not a valid number"));
    }

    #[test]
    fn test_parse_input_size() {
        assert_eq!(parse_input_size("224").ok(), Some(224));
        assert!(parse_input_size("0").is_err());
        assert!(parse_input_size("-3").is_err());
    }
}
