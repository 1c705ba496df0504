use crate::domain::errors::ValidationError;

/// Lot size of a command. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f64);

impl Volume {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Volume(value))
        } else {
            Err(ValidationError::NonPositiveVolume(value))
        }
    }

    /// Parse operator text such as `"0.10"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        let value = raw
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidVolume(raw.to_string()))?;
        Volume::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
