use crate::features::input::UserInput;
use crate::features::schema::{FeatureKind, FeatureSchema};
use crate::prelude::*;
use crate::units::square_meters_to_square_feet;

/// Single model input row, aligned with the [`FeatureSchema`] it has been built from.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Walks the schema and fills in every column:
    ///
    /// - known numeric columns from the input, areas converted to square feet,
    /// - `typology_*` indicators with `1` for the chosen property type and `0` otherwise,
    /// - anything else with `0`.
    pub fn build(input: &UserInput, schema: &FeatureSchema) -> Self {
        let living_area = square_meters_to_square_feet(input.living_area_m2);
        let land_area = square_meters_to_square_feet(input.land_area_m2);

        let mut n_hot = 0;
        let values: Vec<f64> = schema
            .columns()
            .iter()
            .map(|column| match &column.kind {
                FeatureKind::LivingArea => living_area,
                FeatureKind::LandArea => land_area,
                FeatureKind::Rooms => input.rooms as f64,
                FeatureKind::Latitude => input.location.latitude,
                FeatureKind::Longitude => input.location.longitude,
                FeatureKind::Typology(_) => {
                    if column.kind.is_typology_of(input.property_type) {
                        n_hot += 1;
                        1.0
                    } else {
                        0.0
                    }
                }
                FeatureKind::Unknown => 0.0,
            })
            .collect();

        if n_hot == 0 {
            debug!(
                property_type = input.property_type.as_str(),
                "no typology column matches, all of them are zero",
            );
        }
        debug_assert_eq!(values.len(), schema.len());
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
