//! Utility functions shared across layers.
//!
//! - [`alias`] - Random alias generation

pub mod alias;
