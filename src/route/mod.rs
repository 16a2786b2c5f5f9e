//! Route Index
//!
//! Flattens a content item's containment tree into route index records: one
//! self-record for the owning item plus one record per enabled contained node,
//! each carrying a fully resolved path.

pub mod aspect;
pub mod builder;
pub mod path;
pub mod record;
pub mod testing;
pub mod walker;

pub use aspect::{
    AspectResolver, ContainedItemsAspect, ContainerAccessor, ContentNode, RouteHandlerAspect,
};
pub use builder::RouteIndexBuilder;
pub use record::{IndexRecord, OwnerState};
pub use walker::ContainedItemWalker;
