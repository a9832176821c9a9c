use super::weights::ScoringWeights;

/// Check that every weight is a finite number.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), Vec<String>> {
    let errors: Vec<String> = weights
        .iter()
        .filter(|(_, w)| !w.is_finite())
        .map(|(category, w)| format!("weights.{}: must be a finite number, got {}", category.key(), w))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Parse a weight typed by the user. Accepts anything `f64` parses except
/// NaN and infinities.
pub fn parse_weight(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(v) => Err(format!("weight must be finite, got {}", v)),
        Err(e) => Err(format!("invalid number '{}': {}", s.trim(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::StatCategory;

    #[test]
    fn test_default_weights_valid() {
        assert!(validate_weights(&ScoringWeights::default()).is_ok());
    }

    #[test]
    fn test_negative_weights_valid() {
        let weights = ScoringWeights::zero().with(StatCategory::Points, -3.0);
        assert!(validate_weights(&weights).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let weights = ScoringWeights::zero()
            .with(StatCategory::Points, f64::NAN) // Error 1
            .with(StatCategory::Blocks, f64::INFINITY); // Error 2
        let errors = validate_weights(&weights).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("weights.points"));
        assert!(errors[1].contains("weights.blocks"));
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(" 1.5 ").unwrap(), 1.5);
        assert_eq!(parse_weight("-0.5").unwrap(), -0.5);
        assert!(parse_weight("NaN").is_err());
        assert!(parse_weight("inf").is_err());
        assert!(parse_weight("abc").is_err());
    }
}
