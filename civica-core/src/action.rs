//! The closed set of actions the intent router can choose.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the pipeline should do next with the current turn.
///
/// Set exactly once per turn by the intent router and read exactly once
/// by the orchestrator's routing function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    /// Search the vector index before answering.
    Retrieve,
    /// Answer directly from conversation context.
    Respond,
    /// Close the conversation with a canned message.
    End,
}

impl PendingAction {
    /// Parse a wire-format action name. Unknown names return `None`;
    /// the router maps that to `Respond` and logs the original value.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim() {
            "retrieve" => Some(Self::Retrieve),
            "respond" => Some(Self::Respond),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve",
            Self::Respond => "respond",
            Self::End => "end",
        }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
