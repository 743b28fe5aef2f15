//! Pipeline stages
//!
//! A conversion moves through these states strictly in order. Each transition
//! is one pipeline step; the first failing step ends the conversion.

use std::fmt;

/// State reached after a pipeline step succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Input bytes decoded into a mapping
    Decoded,
    /// Source version accepted
    VersionVerified,
    /// `id` set
    IdAssigned,
    /// `asyncapi` set to the target version
    VersionStamped,
    /// Servers renamed and keyed
    ServersUpdated,
    /// `channels` derived from the legacy shape
    ChannelsCreated,
    /// Channel parameters, operations and bindings rewritten
    ChannelsAltered,
    /// Shared components rewritten
    ComponentsUpdated,
    /// Legacy fields removed
    CleanedUp,
    /// Output bytes produced
    Encoded,
}

impl Stage {
    /// Every stage, in pipeline order
    pub const ORDER: [Stage; 10] = [
        Stage::Decoded,
        Stage::VersionVerified,
        Stage::IdAssigned,
        Stage::VersionStamped,
        Stage::ServersUpdated,
        Stage::ChannelsCreated,
        Stage::ChannelsAltered,
        Stage::ComponentsUpdated,
        Stage::CleanedUp,
        Stage::Encoded,
    ];

    /// Stage that follows this one, if any
    #[must_use]
    pub fn next(self) -> Option<Stage> {
        let index = Self::ORDER.iter().position(|s| *s == self)?;
        Self::ORDER.get(index + 1).copied()
    }

    /// Snake-case name used in logs
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Decoded => "decoded",
            Stage::VersionVerified => "version_verified",
            Stage::IdAssigned => "id_assigned",
            Stage::VersionStamped => "version_stamped",
            Stage::ServersUpdated => "servers_updated",
            Stage::ChannelsCreated => "channels_created",
            Stage::ChannelsAltered => "channels_altered",
            Stage::ComponentsUpdated => "components_updated",
            Stage::CleanedUp => "cleaned_up",
            Stage::Encoded => "encoded",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
