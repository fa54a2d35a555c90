//! Avatar profile business logic: normalization and store ports.

pub mod normalizer;
pub mod ports;
