//! Command-line configuration shared by the binaries.

use std::time::Duration;

use clap::Args;

use crate::constants::{DRAG_DEBOUNCE, DRAG_DISTANCE_THRESHOLD};
use crate::gesture::GestureConfig;

#[derive(Args, Debug, Clone)]
pub struct GestureArgs {
    /// Distance the pointer must travel after a press before a drag starts.
    #[arg(long = "threshold", value_name = "UNITS", default_value_t = DRAG_DISTANCE_THRESHOLD)]
    pub threshold: f64,

    /// Time that must pass after a press before a drag starts.
    #[arg(
        long = "debounce-ms",
        value_name = "MILLIS",
        default_value_t = DRAG_DEBOUNCE.as_millis() as u64
    )]
    pub debounce_ms: u64,
}

impl TryFrom<&GestureArgs> for GestureConfig {
    type Error = String;

    fn try_from(args: &GestureArgs) -> Result<Self, Self::Error> {
        if !args.threshold.is_finite() || !(0.0..=1000.0).contains(&args.threshold) {
            return Err("threshold must be between 0 and 1000".to_string());
        }
        if args.debounce_ms > 10_000 {
            return Err("debounce must be at most 10000 ms".to_string());
        }
        Ok(Self {
            distance_threshold: args.threshold,
            debounce: Duration::from_millis(args.debounce_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        gesture: GestureArgs,
    }

    #[test]
    fn defaults_match_constants() {
        let cli = Cli::parse_from(["dnd"]);
        let config = GestureConfig::try_from(&cli.gesture).unwrap();
        assert_eq!(config, GestureConfig::default());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cli = Cli::parse_from(["dnd", "--threshold=-1"]);
        assert!(GestureConfig::try_from(&cli.gesture).is_err());
        let cli = Cli::parse_from(["dnd", "--debounce-ms", "20000"]);
        assert!(GestureConfig::try_from(&cli.gesture).is_err());
        let cli = Cli::parse_from(["dnd", "--threshold", "2.5", "--debounce-ms", "0"]);
        let config = GestureConfig::try_from(&cli.gesture).unwrap();
        assert_eq!(config.distance_threshold, 2.5);
        assert_eq!(config.debounce, Duration::ZERO);
    }
}
