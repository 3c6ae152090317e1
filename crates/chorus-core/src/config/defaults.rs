// Single source of truth for all default values.

// --- Frequency ---
pub const DEFAULT_BASE_FREQUENCY_CPM: f64 = 6.0;
pub const DEFAULT_MIN_FREQUENCY_CPM: f64 = 1.0;
pub const DEFAULT_MAX_FREQUENCY_CPM: f64 = 20.0;
pub const DEFAULT_BASELINE_ACTIVITY: f64 = 0.3;
pub const DEFAULT_ADAPTATION_SMOOTHNESS: f64 = 0.2;
pub const DEFAULT_SILENCE_THRESHOLD_MS: f64 = 3_000.0;
pub const DEFAULT_SILENCE_RAMP_MS: f64 = 10_000.0;
pub const DEFAULT_MAX_STEP_FRACTION: f64 = 0.25;

// --- Generation ---
pub const DEFAULT_RULE_BASED_RATIO: f64 = 0.7;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_PERFORMANCE_THRESHOLD_MS: f64 = 2_000.0;
pub const DEFAULT_RATIO_INCREASE_STEP: f64 = 0.05;
pub const DEFAULT_RATIO_DECREASE_STEP: f64 = 0.02;
pub const DEFAULT_RATIO_CEILING: f64 = 0.9;
pub const DEFAULT_RATIO_FLOOR: f64 = 0.5;
pub const DEFAULT_METRICS_ALPHA: f64 = 0.1;
pub const DEFAULT_FALLBACK_TO_RULE_BASED: bool = true;
pub const DEFAULT_RECENT_HISTORY_SIZE: usize = 5;
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 0;

// --- Interaction ---
pub const DEFAULT_PICKUP_WINDOW_MS: f64 = 5_000.0;
pub const DEFAULT_TIMING_WEIGHT: f64 = 0.6;
pub const DEFAULT_CONTENT_WEIGHT: f64 = 0.4;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;
pub const DEFAULT_MAX_TRACKED_COMMENTS: usize = 100;
pub const DEFAULT_MAX_EVENTS: usize = 1_000;

// --- Learning ---
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_DECAY_RATE: f64 = 0.01;
pub const DEFAULT_MIN_WEIGHT: f64 = 0.1;
pub const DEFAULT_MAX_WEIGHT: f64 = 2.0;
pub const DEFAULT_THUMBS_UP_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_THUMBS_DOWN_MULTIPLIER: f64 = -1.0;
pub const DEFAULT_CLICK_MULTIPLIER: f64 = 0.3;
pub const DEFAULT_PICKUP_MULTIPLIER: f64 = 0.8;

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "chorus.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
