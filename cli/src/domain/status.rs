//! Unit status reported back to the orchestrator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of the unit as shown by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum UnitStatus {
    /// Work in progress.
    Maintenance(String),
    /// Ready.
    Active(String),
    /// Needs operator attention.
    Blocked(String),
}

impl UnitStatus {
    #[must_use]
    pub fn maintenance(message: impl Into<String>) -> Self {
        Self::Maintenance(message.into())
    }

    #[must_use]
    pub fn active(message: impl Into<String>) -> Self {
        Self::Active(message.into())
    }

    #[must_use]
    pub fn blocked(message: impl Into<String>) -> Self {
        Self::Blocked(message.into())
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Maintenance(_) => "maintenance",
            Self::Active(_) => "active",
            Self::Blocked(_) => "blocked",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Maintenance(m) | Self::Active(m) | Self::Blocked(m) => m,
        }
    }

    #[must_use]
    pub fn is_maintenance(&self) -> bool {
        matches!(self, Self::Maintenance(_))
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}
