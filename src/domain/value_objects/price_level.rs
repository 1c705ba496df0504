use crate::domain::errors::ValidationError;

/// Stop-loss or take-profit level attached to a command.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PriceLevel(f64);

impl PriceLevel {
    pub fn new(field: &'static str, value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() {
            Ok(PriceLevel(value))
        } else {
            Err(ValidationError::InvalidPriceLevel {
                field,
                value: value.to_string(),
            })
        }
    }

    /// Parse an optional operator field. Blank text means "not set".
    pub fn parse_optional(
        field: &'static str,
        raw: Option<&str>,
    ) -> Result<Option<Self>, ValidationError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        let value = raw
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidPriceLevel {
                field,
                value: raw.to_string(),
            })?;
        PriceLevel::new(field, value).map(Some)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_level_parse_blank_is_none() {
        assert_eq!(PriceLevel::parse_optional("sl", None).unwrap(), None);
        assert_eq!(PriceLevel::parse_optional("sl", Some("")).unwrap(), None);
        assert_eq!(PriceLevel::parse_optional("tp", Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_price_level_parse_number() {
        let level = PriceLevel::parse_optional("sl", Some("1.1000")).unwrap();
        assert_eq!(level.unwrap().value(), 1.1);
        assert_eq!(level.unwrap().to_string(), "1.1");
    }

    #[test]
    fn test_price_level_parse_garbage() {
        let err = PriceLevel::parse_optional("tp", Some("abc")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidPriceLevel {
                field: "tp",
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_price_level_rejects_nan() {
        assert!(PriceLevel::new("sl", f64::NAN).is_err());
        assert!(PriceLevel::parse_optional("sl", Some("NaN")).is_err());
    }
}
