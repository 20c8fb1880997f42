//! Version management endpoints over the store's snapshot operations.

pub mod handlers;
