//! Development hot-reload notices.
//!
//! When authored content is reloaded while the client runs, the content
//! server announces which kind of content changed and which ids were
//! affected. Payloads reloaded this way may be written back into the store
//! without a fresh allocation, so consumers that detect changes by identity
//! need this notice to know their applied state is stale.

use std::fmt;

use strum::EnumString;

use crate::facet::FacetScope;
use crate::snapshot::CharacterId;

/// Kind of authored content that was reloaded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ContentType {
    Zone,
    Character,
    #[strum(default)]
    Other(String),
}

impl ContentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Zone => "zone",
            Self::Character => "character",
            Self::Other(name) => name,
        }
    }

    /// Snapshot facets fed by this kind of content.
    pub fn facets(&self) -> FacetScope {
        match self {
            Self::Zone => FacetScope::ZONE,
            Self::Character => FacetScope::ROSTER,
            Self::Other(_) => FacetScope::empty(),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Other(value))
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.as_str().to_string()
    }
}

/// Content was hot-reloaded in development.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContentReloaded {
    pub content_type: ContentType,
    pub reloaded_ids: Vec<String>,
    /// Where the reload came from (file watcher, admin command, ...).
    pub source: String,
}

impl ContentReloaded {
    pub fn new<I, S>(content_type: ContentType, reloaded_ids: I, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            content_type,
            reloaded_ids: reloaded_ids.into_iter().map(Into::into).collect(),
            source: source.into(),
        }
    }

    pub fn count(&self) -> usize {
        self.reloaded_ids.len()
    }

    /// Reloaded ids that name party members. Ids that do not parse are skipped.
    pub fn character_ids(&self) -> Vec<CharacterId> {
        if self.content_type != ContentType::Character {
            return Vec::new();
        }
        self.reloaded_ids
            .iter()
            .filter_map(|id| id.parse().ok())
            .collect()
    }
}
