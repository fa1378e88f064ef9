//! Turns the form input into a model row.

pub mod input;
pub mod schema;
pub mod vector;

pub use self::input::{InvalidInput, Location, PropertyType, UserInput};
pub use self::schema::FeatureSchema;
pub use self::vector::FeatureVector;
