//! Text encoding of the ingestion response the terminal parses.
//!
//! One line per command: `DIRECTION,SYMBOL,VOLUME[,SL,TP]`. When only one of
//! SL/TP is set the other is written as `0`. An empty batch is the literal
//! `NOCOMMAND`.

use crate::domain::entities::command::Command;

pub const NO_COMMAND: &str = "NOCOMMAND";

pub const CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Placeholder for an unset level when the other one is present.
const UNSET_LEVEL: &str = "0";

pub fn encode_command(command: &Command) -> String {
    let base = format!(
        "{},{},{}",
        command.direction, command.symbol, command.volume
    );
    match (command.sl, command.tp) {
        (None, None) => base,
        (Some(sl), Some(tp)) => format!("{},{},{}", base, sl, tp),
        (Some(sl), None) => format!("{},{},{}", base, sl, UNSET_LEVEL),
        (None, Some(tp)) => format!("{},{},{}", base, UNSET_LEVEL, tp),
    }
}

/// Response body for a drained batch.
pub fn encode_batch(commands: &[Command]) -> String {
    if commands.is_empty() {
        return NO_COMMAND.to_string();
    }
    commands
        .iter()
        .map(encode_command)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::command::{CommandRequest, CommandSpec};

    fn command(request: CommandRequest) -> Command {
        Command::new(0, CommandSpec::try_from(&request).unwrap())
    }

    #[test]
    fn test_encode_without_levels() {
        let cmd = command(CommandRequest::new("eurusd", "buy", "0.10"));
        assert_eq!(encode_command(&cmd), "BUY,EURUSD,0.1");
    }

    #[test]
    fn test_encode_sl_only() {
        let cmd = command(CommandRequest::new("eurusd", "buy", "0.10").with_sl("1.1000"));
        assert_eq!(encode_command(&cmd), "BUY,EURUSD,0.1,1.1,0");
    }

    #[test]
    fn test_encode_tp_only() {
        let cmd = command(CommandRequest::new("GBPUSD", "SELL", "2").with_tp("1.25"));
        assert_eq!(encode_command(&cmd), "SELL,GBPUSD,2,0,1.25");
    }

    #[test]
    fn test_encode_both_levels() {
        let cmd = command(
            CommandRequest::new("XAUUSD", "SELL", "0.05")
                .with_sl("2010.5")
                .with_tp("1990"),
        );
        assert_eq!(encode_command(&cmd), "SELL,XAUUSD,0.05,2010.5,1990");
    }

    #[test]
    fn test_encode_empty_batch() {
        assert_eq!(encode_batch(&[]), "NOCOMMAND");
    }

    #[test]
    fn test_encode_batch_joins_with_newline() {
        let batch = vec![
            command(CommandRequest::new("EURUSD", "BUY", "0.1")),
            command(CommandRequest::new("USDJPY", "SELL", "1").with_sl("151")),
        ];
        assert_eq!(encode_batch(&batch), "BUY,EURUSD,0.1\nSELL,USDJPY,1,151,0");
    }
}
