//! Value objects for the exercise domain

mod match_kind;
mod voice_profile;
mod word_id;

pub use match_kind::MatchKind;
pub use voice_profile::{VoiceBackend, VoiceProfile};
pub use word_id::WordId;
