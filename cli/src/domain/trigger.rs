//! Triggers delivered by the orchestrator.

use std::fmt;
use std::str::FromStr;

/// One lifecycle event; each is handled to completion before the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Install,
    ConfigChanged,
    RelationDeparted,
    UpgradeAction,
    RegisterAction,
}

impl Trigger {
    /// Every trigger, in dispatch table order.
    pub const ALL: [Self; 5] = [
        Self::Install,
        Self::ConfigChanged,
        Self::RelationDeparted,
        Self::UpgradeAction,
        Self::RegisterAction,
    ];

    /// Hook or action name as the orchestrator spells it.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::ConfigChanged => "config-changed",
            Self::RelationDeparted => "container-relation-departed",
            Self::UpgradeAction => "upgrade",
            Self::RegisterAction => "register",
        }
    }

    /// Operator-initiated actions, as opposed to automatic hooks.
    #[must_use]
    pub fn is_action(self) -> bool {
        matches!(self, Self::UpgradeAction | Self::RegisterAction)
    }

    /// Parse a dispatch path such as `hooks/config-changed` or
    /// `actions/register`. A bare name is accepted too.
    #[must_use]
    pub fn from_dispatch_path(path: &str) -> Option<Self> {
        let (kind, name) = match path.trim_matches('/').rsplit_once('/') {
            Some((kind, name)) => (Some(kind.rsplit('/').next().unwrap_or(kind)), name),
            None => (None, path.trim_matches('/')),
        };
        let trigger: Self = name.parse().ok()?;
        match kind {
            Some("hooks") if trigger.is_action() => None,
            Some("actions") if !trigger.is_action() => None,
            Some("hooks" | "actions") | None => Some(trigger),
            Some(_) => None,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown trigger '{s}'"))
    }
}
