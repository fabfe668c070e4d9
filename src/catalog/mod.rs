//! Club catalog data.
//!
//! Static listings of club events and learning resources served by the API.

mod events;
mod resources;

pub use events::{find_event, list_events, partition_events, Event, EventKind};
pub use resources::{
    find_resource, list_resources, resource_categories, Resource, ResourceKind, ALL_CATEGORIES,
};
