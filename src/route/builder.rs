//! Route index builder for a single content item

use crate::content::ContentItem;
use crate::error::IndexError;
use crate::route::aspect::AspectResolver;
use crate::route::record::{IndexRecord, OwnerState};
use crate::route::walker::ContainedItemWalker;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Builds the route index records of one content item at a time
///
/// The resolver is shared; builds for different items may run concurrently.
pub struct RouteIndexBuilder<R> {
    resolver: Arc<R>,
    cancellation: CancellationToken,
}

impl<R: AspectResolver> RouteIndexBuilder<R> {
    pub fn new(resolver: Arc<R>) -> Self {
        Self {
            resolver,
            cancellation: CancellationToken::new(),
        }
    }

    /// Abort in-flight builds at their next aspect resolution once `token`
    /// is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Build the index records for `item`.
    ///
    /// Returns `Ok(None)` when the item is not subject to routing, or is
    /// neither published nor latest and not flagged as removed. Otherwise the
    /// first record is always the item's self-record, followed by the
    /// contained item records in depth-first pre-order.
    ///
    /// Whenever contained items are not walked, the part's `removed` flag is
    /// cleared so the caller persists it as a regular part.
    #[instrument(skip_all, fields(content_item_id = %item.content_item_id))]
    pub async fn build(
        &self,
        item: &mut ContentItem<R::Node>,
    ) -> Result<Option<Vec<IndexRecord>>, IndexError> {
        let start = Instant::now();

        let Some(part) = item.autoroute.as_mut() else {
            debug!("No autoroute part, item is not routed");
            return Ok(None);
        };

        if !item.published && !item.latest && !part.removed {
            debug!("Item is neither published nor latest, nothing to index");
            return Ok(None);
        }

        let owner = OwnerState {
            content_item_id: item.content_item_id.clone(),
            published: item.published,
            latest: item.latest,
        };

        let mut records = vec![IndexRecord::owner(
            &owner,
            part.routable_path().map(str::to_string),
        )];

        if !part.walks_contained_items() {
            if part.removed {
                debug!("Clearing removed marker after tombstone entry");
            }
            part.removed = false;
            log_built(&records, start);
            return Ok(Some(records));
        }

        let base_path = part.path.clone();

        if self.cancellation.is_cancelled() {
            return Err(IndexError::Cancelled(owner.content_item_id));
        }
        let aspect = self.resolver.contained_items(&item.content).await?;

        let walker = ContainedItemWalker::new(self.resolver.as_ref(), &self.cancellation);
        let contained = walker
            .walk(&owner, aspect, &item.content, &base_path)
            .await?;
        records.extend(contained);

        log_built(&records, start);
        Ok(Some(records))
    }
}

fn log_built(records: &[IndexRecord], start: Instant) {
    info!(
        record_count = records.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Built route index records"
    );
}
