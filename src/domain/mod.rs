//! Mortgage domain: reference sets, the mortgage entity and raw input records.

pub mod lookup;
pub mod money;
pub mod mortgage;
pub mod ports;
pub mod record;
