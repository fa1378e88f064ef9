use itertools::Itertools;

use crate::features::input::PropertyType;
use crate::prelude::*;

pub const TYPOLOGY_PREFIX: &str = "typology_";

/// What a model column is fed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureKind {
    /// Living area in square feet.
    LivingArea,

    /// Land area in square feet.
    LandArea,

    Rooms,
    Latitude,
    Longitude,

    /// One-hot property type indicator, holds the column name without the prefix.
    Typology(String),

    /// Column the form knows nothing about, always zero.
    Unknown,
}

/// Column names of the numeric features the form fills in.
static NUMERIC_COLUMNS: phf::Map<&'static str, FeatureKind> = phf::phf_map! {
    "living_area" => FeatureKind::LivingArea,
    "land_area" => FeatureKind::LandArea,
    "rooms" => FeatureKind::Rooms,
    "latitude" => FeatureKind::Latitude,
    "longitude" => FeatureKind::Longitude,
};

impl FeatureKind {
    fn from_column_name(name: &str) -> Self {
        if let Some(kind) = NUMERIC_COLUMNS.get(name) {
            return kind.clone();
        }
        match name.strip_prefix(TYPOLOGY_PREFIX) {
            Some(category) => Self::Typology(category.to_string()),
            None => Self::Unknown,
        }
    }

    /// Whether this is the indicator column of the property type.
    ///
    /// The column suffix has to end with one of the type's raw categories.
    #[must_use]
    pub fn is_typology_of(&self, property_type: PropertyType) -> bool {
        match self {
            Self::Typology(suffix) => property_type
                .raw_categories()
                .iter()
                .any(|category| suffix.ends_with(category)),
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureColumn {
    pub name: String,
    pub kind: FeatureKind,
}

/// Ordered model columns paired with their kinds.
///
/// The order is the one the model has been trained with, vectors are always built by walking it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let columns = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let kind = FeatureKind::from_column_name(&name);
                FeatureColumn { name, kind }
            })
            .collect_vec();

        let unknown = columns
            .iter()
            .filter(|column| column.kind == FeatureKind::Unknown)
            .map(|column| column.name.as_str())
            .join(", ");
        if !unknown.is_empty() {
            info!(columns = %unknown, "these columns will be zero-filled");
        }

        let schema = Self { columns };
        let uncovered = PropertyType::ALL
            .into_iter()
            .filter(|property_type| !schema.covers(*property_type))
            .map(PropertyType::as_str)
            .join(", ");
        if !uncovered.is_empty() {
            warn!(
                property_types = %uncovered,
                "no typology column for these property types, their indicators will all be zero",
            );
        }
        schema
    }

    /// Whether any `typology_*` column lights up for the property type.
    #[must_use]
    pub fn covers(&self, property_type: PropertyType) -> bool {
        self.columns
            .iter()
            .any(|column| column.kind.is_typology_of(property_type))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ok() {
        let schema = FeatureSchema::new(["rooms", "typology_Estate", "sea_view", "latitude"]);
        let kinds = schema.columns().iter().map(|column| &column.kind).collect_vec();
        assert_eq!(
            kinds,
            [
                &FeatureKind::Rooms,
                &FeatureKind::Typology("Estate".to_string()),
                &FeatureKind::Unknown,
                &FeatureKind::Latitude,
            ],
        );
        assert_eq!(
            schema.names().collect_vec(),
            ["rooms", "typology_Estate", "sea_view", "latitude"],
        );
    }

    #[test]
    fn covers_ok() {
        let schema = FeatureSchema::new(["living_area", "typology_House", "typology_Apartment"]);
        assert!(schema.covers(PropertyType::House));
        assert!(schema.covers(PropertyType::Apartment));
        assert!(!schema.covers(PropertyType::Estate));
        assert!(!schema.covers(PropertyType::Other));
    }

    #[test]
    fn typology_suffix_match_ok() {
        let kind = FeatureKind::from_column_name("typology_Radhus_House");
        assert!(kind.is_typology_of(PropertyType::House));
        assert!(!kind.is_typology_of(PropertyType::Apartment));
        assert!(!FeatureKind::Rooms.is_typology_of(PropertyType::House));
    }
}
