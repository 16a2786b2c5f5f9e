//! Contained item walker for descending a content item's containment tree

use crate::error::IndexError;
use crate::route::aspect::{AspectResolver, ContainedItemsAspect, ContentNode};
use crate::route::path::join_segment;
use crate::route::record::{IndexRecord, OwnerState};
use futures::future::{BoxFuture, FutureExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Depth-first walker over contained items
///
/// Emits one record per enabled contained node in pre-order. Every await is
/// an aspect resolution and is preceded by a cancellation check.
pub struct ContainedItemWalker<'r, R: AspectResolver> {
    resolver: &'r R,
    cancellation: &'r CancellationToken,
}

impl<'r, R: AspectResolver> ContainedItemWalker<'r, R> {
    pub fn new(resolver: &'r R, cancellation: &'r CancellationToken) -> Self {
        Self {
            resolver,
            cancellation,
        }
    }

    /// Walk the containers of `payload` described by `aspect`.
    ///
    /// `base_path` is the path accumulated so far; relative child segments are
    /// appended to it.
    pub async fn walk(
        &self,
        owner: &OwnerState,
        aspect: ContainedItemsAspect<R::Node>,
        payload: &R::Node,
        base_path: &str,
    ) -> Result<Vec<IndexRecord>, IndexError> {
        let mut records = Vec::new();
        self.walk_into(owner, aspect, payload, base_path.to_string(), &mut records)
            .await?;
        Ok(records)
    }

    fn walk_into<'a>(
        &'a self,
        owner: &'a OwnerState,
        aspect: ContainedItemsAspect<R::Node>,
        payload: &'a R::Node,
        base_path: String,
        records: &'a mut Vec<IndexRecord>,
    ) -> BoxFuture<'a, Result<(), IndexError>>
    where
        R::Node: 'a,
    {
        async move {
            for accessor in &aspect.accessors {
                let children = accessor.children(payload)?;
                trace!(
                    container = accessor.name(),
                    locator = payload.locator(),
                    child_count = children.len(),
                    "Visiting container"
                );

                for child in children {
                    self.ensure_active(owner)?;
                    let handler = self.resolver.route_handler(&child).await?;

                    if handler.disabled {
                        debug!(
                            contained_content_item_id = child.content_item_id(),
                            "Contained item routing disabled, skipping record"
                        );
                    } else {
                        let path = if handler.absolute {
                            handler.path.clone()
                        } else {
                            join_segment(&base_path, &handler.path)
                        };
                        trace!(
                            contained_content_item_id = child.content_item_id(),
                            path = %path,
                            "Emitting contained item record"
                        );
                        records.push(IndexRecord::contained(
                            owner,
                            path,
                            child.content_item_id(),
                            child.locator(),
                        ));
                    }

                    // Descendants always extend the base relatively, even below
                    // disabled or absolute nodes.
                    let child_base = join_segment(&base_path, &handler.path);

                    self.ensure_active(owner)?;
                    let child_aspect = self.resolver.contained_items(&child).await?;
                    if child_aspect.is_empty() {
                        continue;
                    }
                    self.walk_into(owner, child_aspect, &child, child_base, &mut *records)
                        .await?;
                }
            }
            Ok(())
        }
        .boxed()
    }

    fn ensure_active(&self, owner: &OwnerState) -> Result<(), IndexError> {
        if self.cancellation.is_cancelled() {
            debug!(content_item_id = %owner.content_item_id, "Walk cancelled");
            return Err(IndexError::Cancelled(owner.content_item_id.clone()));
        }
        Ok(())
    }
}
