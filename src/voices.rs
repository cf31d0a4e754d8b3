//! Voice catalog
//!
//! Static list of the assistant voices this build knows about. Selection is
//! by stable id; name and description are display-only.

use serde::Serialize;

/// An assistant voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Stable provider-side voice id
    pub id: &'static str,

    /// Display name
    pub name: &'static str,

    /// Short display description
    pub description: &'static str,
}

/// Custom British voices available to the assistant
pub const BRITISH_VOICES: &[Voice] = &[Voice {
    id: "Q0HZwrR1H2SmRvd5cX3U",
    name: "Charlie",
    description: "Custom voice",
}];

/// The voice used when no selection is made
pub fn default_voice() -> &'static Voice {
    &BRITISH_VOICES[0]
}

/// Look up a voice by its stable id
pub fn find_voice(id: &str) -> Option<&'static Voice> {
    BRITISH_VOICES.iter().find(|v| v.id == id)
}
