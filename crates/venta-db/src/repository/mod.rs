//! # Repositories
//!
//! Repository implementations over the shared connection pool.
//!
//! - [`product`] - Catalog reads, writes, and stock adjustments
//! - [`sale`] - Sale history, pending-sync queries, and the transactional
//!   commit unit

pub mod product;
pub mod sale;
