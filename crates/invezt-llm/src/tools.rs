//! Hosted tool directives
//!
//! Hosted tools run on the provider's side while the model generates. The
//! request only switches them on; nothing is executed locally.

use serde::{Deserialize, Serialize};

/// A capability the provider executes on behalf of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostedTool {
    /// Live web search grounding
    WebSearch,
}
