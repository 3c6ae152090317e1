mod audio_tick;
mod comment;
mod context_snapshot;
mod degradation_event;
mod detection_result;
mod feedback;
mod preferences;
mod role_type;

pub use audio_tick::AudioAnalysisTick;
pub use comment::{Comment, CommentSource, Interaction};
pub use context_snapshot::ContextSnapshot;
pub use degradation_event::DegradationEvent;
pub use detection_result::DetectionResult;
pub use feedback::{FeedbackEvent, FeedbackKind};
pub use preferences::{RoleWeights, UserPreferences};
pub use role_type::RoleType;
