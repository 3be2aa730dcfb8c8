//! Platform capability detection
//!
//! The source platform duck-typed its capabilities at call sites; here the
//! result of detection is an explicit value computed once by the
//! composition root and injected into the resolvers. Absent tiers are
//! skipped entirely rather than attempted and failed.

use serde::{Deserialize, Serialize};

/// Which platform-provided speech facilities exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    /// An on-device synthesis engine is present
    pub builtin_synthesis: bool,
    /// A platform built-in recognizer is present
    pub builtin_recognition: bool,
}

impl Capabilities {
    /// All platform facilities present
    #[must_use]
    pub const fn all() -> Self {
        Self {
            builtin_synthesis: true,
            builtin_recognition: true,
        }
    }

    /// No platform facilities present (cloud-only deployments)
    #[must_use]
    pub const fn none() -> Self {
        Self {
            builtin_synthesis: false,
            builtin_recognition: false,
        }
    }
}
