//! # Image Tags Module
//!
//! This module defines structures for representing and categorizing tags
//! attached to imageboard images, plus the codec used to convert between
//! the space-separated query strings every booru accepts and structured [`Tag`] values.
//!
//! - [`Tag`](crate::image::tags::Tag): A single tag, its textual content and its type.
//! - [`TagType`](crate::image::tags::TagType): The category of a tag.
//! - [`Tag::array_from_string`] / [`Tag::string_from_array`]: the Tag Codec.

use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt::Display};

/// Represents a single tag associated with an imageboard image.
///
/// Two tags are equal only when both the name and the [`TagType`] match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    /// The textual content of the tag (e.g., "blue_sky", "solo_focus").
    name: String,
    /// The category or type of the tag.
    tag_type: TagType,
}

/// Categorizes the type or nature of a [`Tag`].
///
/// Most backends don't return tag categories at all. Tags coming from them are [`TagType::General`].
///
/// The declaration order is part of the binary format of [`Settings`](crate::client_config::Settings)
/// and [`SearchResult`](crate::search_result::SearchResult) and must not change.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum TagType {
    /// General descriptive tags about the content, scene, or attributes.
    #[default]
    General,
    /// Tags identifying the artist(s) of the work.
    Artist,
    /// Tags identifying specific characters depicted.
    Character,
    /// Tags related to copyright, series, or franchise.
    Copyright,
}

impl Tag {
    /// Creates a new `Tag`.
    pub fn new(name: &str, tag_type: TagType) -> Self {
        Self {
            name: name.to_string(),
            tag_type,
        }
    }

    /// Creates a new [`TagType::General`] tag.
    pub fn general(name: &str) -> Self {
        Self::new(name, TagType::General)
    }

    /// Returns a reference to the textual content of the tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`TagType`] of the tag.
    pub const fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Splits a whitespace-separated query into tags, all of them typed as `tag_type`.
    ///
    /// An empty or blank query yields an empty list.
    pub fn array_from_string(query: &str, tag_type: TagType) -> Vec<Self> {
        query
            .split_whitespace()
            .map(|name| Self::new(name, tag_type))
            .collect()
    }

    /// Joins tag names with single spaces, keeping their order.
    pub fn string_from_array(tags: &[Self]) -> String {
        tags.iter()
            .map(Self::name)
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// Name first, so sorted tag lists display alphabetically.
impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.tag_type.cmp(&other.tag_type))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
