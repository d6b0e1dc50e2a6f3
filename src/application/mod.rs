//! Application layer orchestrating a batch of mortgage records.
//!
//! `BatchProcessor` resolves raw records against the reference sets, builds
//! a `Mortgage` per record and reports each outcome in input order.

pub mod batch;
