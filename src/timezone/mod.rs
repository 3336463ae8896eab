//! Timezone catalog, per-user resolution and clock-time projection.

pub mod catalog;
pub mod projection;
pub mod resolver;
