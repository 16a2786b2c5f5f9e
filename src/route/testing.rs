//! In-memory content trees and resolver for exercising route index builds
//! without a content store.

use crate::content::{AutoroutePart, ContentItem};
use crate::error::AspectError;
use crate::route::aspect::{
    AspectResolver, ContainedItemsAspect, ContainerAccessor, ContentNode, RouteHandlerAspect,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// A node in an in-memory containment tree
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    pub id: String,
    pub locator: String,
    /// `None` means the node carries no route metadata
    pub route: Option<RouteHandlerAspect>,
    /// Named containers, in accessor order
    pub containers: Vec<(String, Vec<TreeNode>)>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Node routed by a relative segment.
    pub fn routed(id: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::new(id).with_route(RouteHandlerAspect::relative(segment))
    }

    pub fn with_route(mut self, route: RouteHandlerAspect) -> Self {
        self.route = Some(route);
        self
    }

    pub fn disabled(mut self) -> Self {
        let route = self.route.get_or_insert_with(RouteHandlerAspect::disabled);
        route.disabled = true;
        self
    }

    pub fn with_container(mut self, name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        self.containers.push((name.into(), children));
        self
    }

    /// Wrap this node as the payload of a top-level content item.
    pub fn into_item(self, part: Option<AutoroutePart>, published: bool, latest: bool) -> ContentItem<TreeNode> {
        ContentItem {
            content_item_id: self.id.clone(),
            published,
            latest,
            autoroute: part,
            content: self,
        }
    }
}

impl ContentNode for TreeNode {
    fn content_item_id(&self) -> &str {
        &self.id
    }

    fn locator(&self) -> &str {
        &self.locator
    }
}

fn child_locator(parent: &str, container: &str, index: usize) -> String {
    if parent.is_empty() {
        format!("{}[{}]", container, index)
    } else {
        format!("{}.{}[{}]", parent, container, index)
    }
}

/// Resolver over [`TreeNode`]s that logs every resolution it performs.
#[derive(Debug, Default)]
pub struct TreeResolver {
    calls: Mutex<Vec<String>>,
    cancel_on: Option<(String, CancellationToken)>,
}

impl TreeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel `token` when the route handler of node `id` is resolved.
    pub fn cancelling_on(id: impl Into<String>, token: CancellationToken) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            cancel_on: Some((id.into(), token)),
        }
    }

    /// Resolutions so far, as `"route:<id>"` or `"contained:<id>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AspectResolver for TreeResolver {
    type Node = TreeNode;

    async fn route_handler(&self, node: &TreeNode) -> Result<RouteHandlerAspect, AspectError> {
        self.calls.lock().push(format!("route:{}", node.id));
        if let Some((id, token)) = &self.cancel_on {
            if *id == node.id {
                token.cancel();
            }
        }
        Ok(node.route.clone().unwrap_or_else(RouteHandlerAspect::disabled))
    }

    async fn contained_items(
        &self,
        node: &TreeNode,
    ) -> Result<ContainedItemsAspect<TreeNode>, AspectError> {
        self.calls.lock().push(format!("contained:{}", node.id));
        let accessors = node
            .containers
            .iter()
            .map(|(name, _)| {
                let container = name.clone();
                ContainerAccessor::new(name.clone(), move |payload: &TreeNode| {
                    let children = payload
                        .containers
                        .iter()
                        .find(|(name, _)| *name == container)
                        .map(|(_, children)| children.as_slice())
                        .unwrap_or_default();
                    Ok(children
                        .iter()
                        .enumerate()
                        .map(|(index, child)| {
                            let mut child = child.clone();
                            child.locator = child_locator(&payload.locator, &container, index);
                            child
                        })
                        .collect())
                })
            })
            .collect();
        Ok(ContainedItemsAspect::new(accessors))
    }
}
