//! Index records produced by the route index builder

use serde::Serialize;

/// Publication state of the owning content item.
///
/// Mirrored onto every record derived from one build, never taken from a
/// contained node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerState {
    pub content_item_id: String,
    pub published: bool,
    pub latest: bool,
}

/// A single route index entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRecord {
    /// Owning top-level content item
    pub content_item_id: String,
    /// Resolved route path; `None` when the owning item's own path is unusable
    pub path: Option<String>,
    pub published: bool,
    pub latest: bool,
    /// Contained node this record represents; `None` for the self-record
    pub contained_content_item_id: Option<String>,
    /// Where the contained node sits within the owner's payload; `None` for the self-record
    pub node_locator: Option<String>,
}

impl IndexRecord {
    /// Record for the owning item itself.
    pub fn owner(owner: &OwnerState, path: Option<String>) -> Self {
        Self {
            content_item_id: owner.content_item_id.clone(),
            path,
            published: owner.published,
            latest: owner.latest,
            contained_content_item_id: None,
            node_locator: None,
        }
    }

    /// Record for a node contained within the owning item.
    pub fn contained(
        owner: &OwnerState,
        path: String,
        contained_content_item_id: &str,
        node_locator: &str,
    ) -> Self {
        Self {
            content_item_id: owner.content_item_id.clone(),
            path: Some(path),
            published: owner.published,
            latest: owner.latest,
            contained_content_item_id: Some(contained_content_item_id.to_string()),
            node_locator: Some(node_locator.to_string()),
        }
    }

    pub fn is_self_record(&self) -> bool {
        self.contained_content_item_id.is_none()
    }
}
