//! Command-line arguments

use clap::{ArgAction, Parser, ValueEnum};
use reattempt_config::{DelaySetting, RetrySettings, TimesSetting};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reattempt")]
#[command(about = "Run a command again until it succeeds", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON settings file (defaults to $REATTEMPT_CONFIG)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Maximum number of retries after the first attempt
    #[arg(long, short = 't', conflicts_with = "unbounded")]
    pub times: Option<u32>,

    /// Retry until the command succeeds, however long it takes
    #[arg(long)]
    pub unbounded: bool,

    /// Fixed delay between attempts in milliseconds
    #[arg(long, short = 'd', conflicts_with = "strategy")]
    pub delay: Option<u64>,

    /// Compute delays with a backoff strategy instead of a fixed wait
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Base delay in milliseconds for linear and exponential strategies
    #[arg(long, requires = "strategy")]
    pub from: Option<u64>,

    /// Step, growth factor or term multiplier, depending on the strategy
    #[arg(long, requires = "strategy")]
    pub scale: Option<u64>,

    /// Fibonacci terms to skip before the first delay
    #[arg(long, requires = "strategy")]
    pub start: Option<u32>,

    /// Randomize every delay
    #[arg(long)]
    pub jitter: bool,

    /// Exit code that counts as success
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub until_exit: i32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Command to run, followed by its arguments
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    Linear,
    Exponential,
    Fibonacci,
}

impl Cli {
    /// Fallback log filter when `RUST_LOG` is unset
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Settings given on the command line; only what was passed is set
    pub fn flag_settings(&self) -> RetrySettings {
        let times = if self.unbounded {
            Some(TimesSetting::Unbounded)
        } else {
            self.times.map(TimesSetting::Limited)
        };

        let delay = match (self.strategy, self.delay) {
            (Some(StrategyArg::Linear), _) => Some(DelaySetting::Linear {
                from: self.from,
                scale: self.scale,
            }),
            (Some(StrategyArg::Exponential), _) => Some(DelaySetting::Exponential {
                from: self.from,
                scale: self.scale,
            }),
            (Some(StrategyArg::Fibonacci), _) => Some(DelaySetting::Fibonacci {
                start: self.start,
                scale: self.scale,
            }),
            (None, Some(0)) => Some(DelaySetting::None),
            (None, Some(ms)) => Some(DelaySetting::Fixed { ms }),
            (None, None) => None,
        };

        RetrySettings {
            times,
            delay,
            jitter: self.jitter,
        }
    }
}
