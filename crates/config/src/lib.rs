//! Retry settings for reattempt
//!
//! Settings are read from an optional JSON file and then overridden by
//! `REATTEMPT_*` environment variables. The result converts into one
//! [`RetryOptions`](reattempt_utils::resilience::RetryOptions) layer.

pub mod loader;
pub mod settings;


pub use loader::ConfigLoader;
pub use settings::{DelaySetting, RetrySettings, TimesSetting};
