//! Serializable retry settings and their conversion into engine options.

use reattempt_core::{Error, DEFAULT_DELAY_MS, UNBOUNDED_KEYWORD};
use reattempt_utils::resilience::{
    self, constant_delay, exponential_delay, fibonacci_delay, linear_delay, Delay, DelayStrategy,
    ExponentialDelayOptions, FibonacciDelayOptions, JitterSource, LinearDelayOptions,
    RetryOptions, Times,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Retry budget as written in settings: a number or `"unbounded"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimesRepr", into = "TimesRepr")]
pub enum TimesSetting {
    Limited(u32),
    Unbounded,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TimesRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<TimesRepr> for TimesSetting {
    type Error = String;

    fn try_from(repr: TimesRepr) -> Result<Self, Self::Error> {
        match repr {
            TimesRepr::Count(times) => Ok(TimesSetting::Limited(times)),
            TimesRepr::Keyword(word) if word == UNBOUNDED_KEYWORD => Ok(TimesSetting::Unbounded),
            TimesRepr::Keyword(word) => Err(format!(
                "expected a retry count or \"{UNBOUNDED_KEYWORD}\", found \"{word}\""
            )),
        }
    }
}

impl From<TimesSetting> for TimesRepr {
    fn from(setting: TimesSetting) -> Self {
        match setting {
            TimesSetting::Limited(times) => TimesRepr::Count(times),
            TimesSetting::Unbounded => TimesRepr::Keyword(UNBOUNDED_KEYWORD.to_string()),
        }
    }
}

impl FromStr for TimesSetting {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(UNBOUNDED_KEYWORD) {
            return Ok(TimesSetting::Unbounded);
        }
        trimmed.parse::<u32>().map(TimesSetting::Limited).map_err(|e| {
            Error::invalid_value(
                "times",
                value,
                format!("expected a retry count or '{UNBOUNDED_KEYWORD}': {e}"),
            )
        })
    }
}

impl fmt::Display for TimesSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimesSetting::Limited(times) => write!(f, "{times}"),
            TimesSetting::Unbounded => f.write_str(UNBOUNDED_KEYWORD),
        }
    }
}

impl From<TimesSetting> for Times {
    fn from(setting: TimesSetting) -> Self {
        match setting {
            TimesSetting::Limited(times) => Times::Limited(times),
            TimesSetting::Unbounded => Times::Unbounded,
        }
    }
}

/// Delay as written in settings, tagged by `strategy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum DelaySetting {
    /// Retry immediately
    None,
    /// Same wait every time
    Fixed { ms: u64 },
    /// `from + attempt * scale`
    Linear {
        from: Option<u64>,
        scale: Option<u64>,
    },
    /// `from`, then `scale^attempt * from` from the second retry on
    Exponential {
        from: Option<u64>,
        scale: Option<u64>,
    },
    /// Fibonacci terms times `scale`
    Fibonacci {
        start: Option<u32>,
        scale: Option<u64>,
    },
}

impl DelaySetting {
    /// Build the engine delay, optionally wrapped in jitter
    pub fn to_delay<T>(self, with_jitter: bool) -> Delay<T> {
        match self {
            DelaySetting::None => Delay::None,
            DelaySetting::Fixed { ms } if !with_jitter => Delay::Fixed(ms),
            DelaySetting::Fixed { ms } => wrap(constant_delay(ms), true),
            DelaySetting::Linear { from, scale } => {
                wrap(linear_delay(LinearDelayOptions { from, scale }), with_jitter)
            }
            DelaySetting::Exponential { from, scale } => wrap(
                exponential_delay(ExponentialDelayOptions { from, scale }),
                with_jitter,
            ),
            DelaySetting::Fibonacci { start, scale } => wrap(
                fibonacci_delay(FibonacciDelayOptions { start, scale }),
                with_jitter,
            ),
        }
    }
}

fn wrap<T, S>(strategy: S, with_jitter: bool) -> Delay<T>
where
    S: DelayStrategy<T> + 'static,
{
    if with_jitter {
        Delay::strategy(resilience::jitter(JitterSource::Strategy(strategy)))
    } else {
        Delay::strategy(strategy)
    }
}

/// Retry settings loaded from a file and the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySettings {
    /// Retry budget; inherits the engine default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<TimesSetting>,
    /// Delay between attempts; inherits the engine default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<DelaySetting>,
    /// Randomize every wait
    #[serde(default)]
    pub jitter: bool,
}

impl RetrySettings {
    /// Parse settings from JSON text
    pub fn from_json(text: &str) -> reattempt_core::Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::json("invalid retry settings", e))
    }

    /// Overlay `higher` on these settings; set fields in `higher` win
    #[must_use]
    pub fn overlay(self, higher: RetrySettings) -> Self {
        Self {
            times: higher.times.or(self.times),
            delay: higher.delay.or(self.delay),
            jitter: self.jitter || higher.jitter,
        }
    }

    /// Convert into one engine options layer.
    ///
    /// Jitter without an explicit delay perturbs the generic 500ms default.
    pub fn to_options<T>(&self) -> RetryOptions<T> {
        let mut options = RetryOptions::new();
        if let Some(times) = self.times {
            options = options.budget(times.into());
        }
        match (self.delay, self.jitter) {
            (Some(delay), with_jitter) => options = options.delay(delay.to_delay(with_jitter)),
            (None, true) => {
                options = options.delay(
                    DelaySetting::Fixed {
                        ms: DEFAULT_DELAY_MS,
                    }
                    .to_delay(true),
                )
            }
            (None, false) => {}
        }
        options
    }
}
