//! Content Items
//!
//! The owning side of a route index build: a top-level content item, its
//! publication flags, and the autoroute configuration attached to it.

pub mod json;

use serde::{Deserialize, Deserializer, Serialize};

pub use json::{ContainerField, JsonAspectResolver, JsonContentItem, JsonNode};

/// Routing configuration attached to a content item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AutoroutePart {
    /// Configured route path (may be empty)
    #[serde(deserialize_with = "null_as_empty")]
    pub path: String,
    pub disabled: bool,
    /// Retraction marker kept for one final tombstone index entry
    pub removed: bool,
    /// Whether contained items get their own index records
    pub route_contained_items: bool,
}

impl AutoroutePart {
    /// The configured path when it can be routed.
    pub fn routable_path(&self) -> Option<&str> {
        if !self.disabled && !self.path.is_empty() {
            Some(&self.path)
        } else {
            None
        }
    }

    /// Whether contained items should be walked for this part.
    pub fn walks_contained_items(&self) -> bool {
        self.route_contained_items && !self.path.is_empty() && !self.disabled && !self.removed
    }
}

/// Stored parts may carry an explicit `null` path; it routes like an empty one.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A top-level content item with payload of node type `N`
#[derive(Debug, Clone)]
pub struct ContentItem<N> {
    pub content_item_id: String,
    pub published: bool,
    pub latest: bool,
    /// `None` when the item is not subject to routing
    pub autoroute: Option<AutoroutePart>,
    /// Root payload; the node contained-item accessors start from
    pub content: N,
}
