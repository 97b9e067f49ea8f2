//! Brand variants served by the same widget core.

use crate::chat::MessageRole;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A deployed marketing site.
///
/// The brand namespaces the persisted session key so two sites on the same
/// host never resume each other's threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    /// Water-pump marketing site.
    #[default]
    AquaPump,
    /// Recruiting SaaS marketing site.
    WorkWave,
}

impl Brand {
    /// Storage namespace, e.g. `aquapump`.
    pub fn namespace(&self) -> &'static str {
        match self {
            Brand::AquaPump => "aquapump",
            Brand::WorkWave => "workwave",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::AquaPump => "AquaPump",
            Brand::WorkWave => "WorkWave",
        }
    }

    pub fn assistant_name(&self) -> &'static str {
        match self {
            Brand::AquaPump => "Aqua AI",
            Brand::WorkWave => "WorkWave AI",
        }
    }

    /// Key of the persisted session slot: `<namespace>.chat.session`.
    pub fn session_storage_key(&self) -> String {
        format!("{}.chat.session", self.namespace())
    }

    /// Label rendered above a message bubble.
    pub fn role_label(&self, role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => "You",
            MessageRole::Assistant => self.assistant_name(),
            MessageRole::System => "System",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Brand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aquapump" => Ok(Brand::AquaPump),
            "workwave" => Ok(Brand::WorkWave),
            other => Err(format!("Unknown brand: {}", other)),
        }
    }
}
