//! Autoroute Index: Route Index Records for Hierarchical Content
//!
//! Flattens a content item and the items nested inside it into flat route
//! index records, each holding a fully resolved path and the publication
//! state of the owning item.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod route;
