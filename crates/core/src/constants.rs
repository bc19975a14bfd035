/// Constants used throughout the reattempt workspace
// Generic option defaults, the lowest-precedence options layer
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMES: u32 = 3;

// Linear delay defaults
pub const LINEAR_DEFAULT_FROM: u64 = 0;
pub const LINEAR_DEFAULT_SCALE: u64 = 100;

// Exponential delay defaults
pub const EXPONENTIAL_DEFAULT_FROM: u64 = 100;
pub const EXPONENTIAL_DEFAULT_SCALE: u64 = 2;

// Fibonacci delay defaults
pub const FIBONACCI_DEFAULT_START: u32 = 0;
pub const FIBONACCI_DEFAULT_SCALE: u64 = 1_000;

// Environment variable names
pub const REATTEMPT_TIMES_VAR: &str = "REATTEMPT_TIMES";
pub const REATTEMPT_DELAY_MS_VAR: &str = "REATTEMPT_DELAY_MS";
pub const REATTEMPT_JITTER_VAR: &str = "REATTEMPT_JITTER";
pub const REATTEMPT_CONFIG_VAR: &str = "REATTEMPT_CONFIG";

// Keyword accepted wherever a retry budget is parsed from text
pub const UNBOUNDED_KEYWORD: &str = "unbounded";
