//! Adapters between the batch processor and the outside world.

pub mod console;
pub mod csv;
