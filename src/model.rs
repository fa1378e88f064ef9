//! Trained model artifact.

pub mod bundle;
pub mod ensemble;
pub mod error;
#[cfg(test)]
pub mod fixtures;

pub use self::bundle::ModelBundle;
pub use self::error::{LoadError, ShapeMismatchError};
