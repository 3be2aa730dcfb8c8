//! Application ports

pub mod content;

pub use content::ContentPort;
