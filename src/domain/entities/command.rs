use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::{price_level::PriceLevel, volume::Volume};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_uppercase().as_str() {
            "BUY" => Ok(Direction::Buy),
            "SELL" => Ok(Direction::Sell),
            _ => Err(ValidationError::InvalidDirection(raw.trim().to_string())),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

/// Raw operator input for one command, as it arrives from the admin surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandRequest {
    pub symbol: String,
    pub direction: String,
    pub volume: String,
    pub sl: Option<String>,
    pub tp: Option<String>,
}

impl CommandRequest {
    pub fn new(symbol: &str, direction: &str, volume: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            direction: direction.to_string(),
            volume: volume.to_string(),
            sl: None,
            tp: None,
        }
    }

    pub fn with_sl(mut self, sl: &str) -> Self {
        self.sl = Some(sl.to_string());
        self
    }

    pub fn with_tp(mut self, tp: &str) -> Self {
        self.tp = Some(tp.to_string());
        self
    }
}

/// A validated command that has not been assigned a queue id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub symbol: String,
    pub direction: Direction,
    pub volume: Volume,
    pub sl: Option<PriceLevel>,
    pub tp: Option<PriceLevel>,
}

impl TryFrom<&CommandRequest> for CommandSpec {
    type Error = ValidationError;

    fn try_from(request: &CommandRequest) -> Result<Self, Self::Error> {
        let symbol = request.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        let direction = Direction::parse(&request.direction)?;
        let volume = Volume::parse(&request.volume)?;
        let sl = PriceLevel::parse_optional("sl", request.sl.as_deref())?;
        let tp = PriceLevel::parse_optional("tp", request.tp.as_deref())?;

        Ok(CommandSpec {
            symbol,
            direction,
            volume,
            sl,
            tp,
        })
    }
}

/// An operator instruction waiting in the outbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: u64,
    pub symbol: String,
    pub direction: Direction,
    pub volume: Volume,
    pub sl: Option<PriceLevel>,
    pub tp: Option<PriceLevel>,
    pub created_at: DateTime<Local>,
}

impl Command {
    pub fn new(id: u64, spec: CommandSpec) -> Self {
        Self {
            id,
            symbol: spec.symbol,
            direction: spec.direction,
            volume: spec.volume,
            sl: spec.sl,
            tp: spec.tp,
            created_at: Local::now(),
        }
    }

    /// `HH:MM:SS`, as shown in the operator's queue listing.
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}
