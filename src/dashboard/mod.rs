//! Read-side helpers for the admin dashboard: filtering, ordering and
//! report export over the store's collections.

pub mod export;
pub mod filter;
