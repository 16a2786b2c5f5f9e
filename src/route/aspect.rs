//! Aspect resolution contract
//!
//! Aspects are derived facets of a content node computed on demand by an
//! external content system. The route index only consumes two of them: a
//! node's route-handling metadata and the containers holding its nested nodes.

use crate::error::AspectError;
use async_trait::async_trait;
use std::fmt;

/// A node that can appear in a content item's containment tree.
pub trait ContentNode: Send + Sync {
    /// Stable identifier of the node
    fn content_item_id(&self) -> &str;

    /// Structural locator of the node within its owning item's payload.
    /// Empty for the owning item's root payload.
    fn locator(&self) -> &str;
}

/// Route-handling metadata for one node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteHandlerAspect {
    /// Path segment, or full path when `absolute` is set
    pub path: String,
    pub disabled: bool,
    /// `path` replaces the accumulated base path instead of extending it
    pub absolute: bool,
}

impl RouteHandlerAspect {
    pub fn relative(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            disabled: false,
            absolute: false,
        }
    }

    pub fn absolute(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            disabled: false,
            absolute: true,
        }
    }

    /// Aspect for a node with no route metadata.
    pub fn disabled() -> Self {
        Self {
            path: String::new(),
            disabled: true,
            absolute: false,
        }
    }
}

type AccessorFn<N> = dyn Fn(&N) -> Result<Vec<N>, AspectError> + Send + Sync;

/// Extracts the immediate children held by one container of a node.
pub struct ContainerAccessor<N> {
    name: String,
    extract: Box<AccessorFn<N>>,
}

impl<N> ContainerAccessor<N> {
    pub fn new<F>(name: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&N) -> Result<Vec<N>, AspectError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            extract: Box::new(extract),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children found in this container, in container order.
    pub fn children(&self, payload: &N) -> Result<Vec<N>, AspectError> {
        (self.extract)(payload)
    }
}

impl<N> fmt::Debug for ContainerAccessor<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerAccessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Ordered set of containers exposed by a node
#[derive(Debug)]
pub struct ContainedItemsAspect<N> {
    pub accessors: Vec<ContainerAccessor<N>>,
}

impl<N> ContainedItemsAspect<N> {
    pub fn new(accessors: Vec<ContainerAccessor<N>>) -> Self {
        Self { accessors }
    }

    /// A node with no containers.
    pub fn empty() -> Self {
        Self {
            accessors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

impl<N> Default for ContainedItemsAspect<N> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Resolves aspects for content nodes.
///
/// Implementations must be safe to share across concurrent builds and must
/// return accessors and children in a stable order.
#[async_trait]
pub trait AspectResolver: Send + Sync {
    type Node: ContentNode;

    /// Route metadata for `node`. Missing metadata is reported as
    /// [`RouteHandlerAspect::disabled`].
    async fn route_handler(&self, node: &Self::Node) -> Result<RouteHandlerAspect, AspectError>;

    /// Containers exposed by `node`.
    async fn contained_items(
        &self,
        node: &Self::Node,
    ) -> Result<ContainedItemsAspect<Self::Node>, AspectError>;
}
