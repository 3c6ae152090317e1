/// Chorus system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds per minute, used to turn a comments-per-minute rate into an interval.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Tolerance used when checking that weight pairs sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Neutral role weight. New users start here and decay pulls weights back toward it.
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// Utterances used when neither generation path produced anything.
pub const FILLER_UTTERANCES: &[&str] = &["Mm-hm.", "I see.", "Go on!", "Oh?"];
