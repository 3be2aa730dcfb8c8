//! Domain entities

mod attempt;
mod session_state;
mod word;

pub use attempt::Attempt;
pub use session_state::SessionState;
pub use word::Word;
