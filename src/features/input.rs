use serde::{Deserialize, Serialize};

/// Property types offered by the form.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    House,
    Apartment,
    Estate,
    Other,
}

impl PropertyType {
    pub const ALL: [Self; 4] = [Self::House, Self::Apartment, Self::Estate, Self::Other];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Estate => "estate",
            Self::Other => "other",
        }
    }

    /// Fluent message ID of the human-readable label.
    #[must_use]
    pub const fn label_id(self) -> &'static str {
        match self {
            Self::House => "property-type-house",
            Self::Apartment => "property-type-apartment",
            Self::Estate => "property-type-estate",
            Self::Other => "property-type-other",
        }
    }

    /// Raw `typology_*` categories the model has been trained on.
    #[must_use]
    pub const fn raw_categories(self) -> &'static [&'static str] {
        match self {
            Self::House => &["House"],
            Self::Apartment => &["Apartment"],
            Self::Estate => &["Estate"],
            Self::Other => &["Other"],
        }
    }
}

/// Geographic location of the property.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Stockholm, used until the user clicks the map.
    pub const DEFAULT: Self = Self {
        latitude: 59.33,
        longitude: 18.06,
    };

    /// The clicked location, or the default one when nothing has been clicked.
    #[must_use]
    pub fn from_click(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Self {
                latitude,
                longitude,
            },
            _ => Self::DEFAULT,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidInput {
    #[error("{field} must be a non-negative number, got {value}")]
    Area { field: &'static str, value: f64 },

    #[error("the number of rooms must be within 1..=20, got {value}")]
    Rooms { value: u32 },

    #[error("invalid location: {latitude}, {longitude}")]
    Location { latitude: f64, longitude: f64 },
}

/// What the user has entered in the form.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub living_area_m2: f64,
    pub land_area_m2: f64,
    pub rooms: u32,
    pub property_type: PropertyType,
    pub location: Location,
}

impl UserInput {
    pub const MIN_ROOMS: u32 = 1;
    pub const MAX_ROOMS: u32 = 20;

    /// Checks the same constraints the form widgets enforce.
    pub fn validated(self) -> Result<Self, InvalidInput> {
        for (field, value) in [
            ("living area", self.living_area_m2),
            ("land area", self.land_area_m2),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInput::Area { field, value });
            }
        }
        if !(Self::MIN_ROOMS..=Self::MAX_ROOMS).contains(&self.rooms) {
            return Err(InvalidInput::Rooms { value: self.rooms });
        }
        let Location {
            latitude,
            longitude,
        } = self.location;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidInput::Location {
                latitude,
                longitude,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> UserInput {
        UserInput {
            living_area_m2: 100.0,
            land_area_m2: 500.0,
            rooms: 4,
            property_type: PropertyType::House,
            location: Location::DEFAULT,
        }
    }

    #[test]
    fn raw_categories_ok() {
        assert_eq!(PropertyType::House.raw_categories(), &["House"]);
        assert_eq!(PropertyType::Apartment.raw_categories(), &["Apartment"]);
        assert_eq!(PropertyType::Estate.raw_categories(), &["Estate"]);
        assert_eq!(PropertyType::Other.raw_categories(), &["Other"]);
    }

    #[test]
    fn default_location_without_click() {
        assert_eq!(Location::from_click(None, None), Location::DEFAULT);
        assert_eq!(Location::from_click(Some(57.7), None), Location::DEFAULT);
        assert_eq!(Location::DEFAULT.latitude, 59.33);
        assert_eq!(Location::DEFAULT.longitude, 18.06);
    }

    #[test]
    fn clicked_location_ok() {
        let location = Location::from_click(Some(57.70887), Some(11.97456));
        assert_eq!(location.latitude, 57.70887);
        assert_eq!(location.longitude, 11.97456);
    }

    #[test]
    fn validated_ok() {
        assert_eq!(input().validated(), Ok(input()));
    }

    #[test]
    fn negative_area_error() {
        let input = UserInput {
            land_area_m2: -5.0,
            ..input()
        };
        assert!(matches!(input.validated(), Err(InvalidInput::Area { field: "land area", .. })));
    }

    #[test]
    fn nan_area_error() {
        let input = UserInput {
            living_area_m2: f64::NAN,
            ..input()
        };
        assert!(input.validated().is_err());
    }

    #[test]
    fn rooms_out_of_range_error() {
        for rooms in [0, 21] {
            let input = UserInput { rooms, ..input() };
            assert_eq!(input.validated(), Err(InvalidInput::Rooms { value: rooms }));
        }
    }

    #[test]
    fn property_type_deserialize_ok() -> crate::prelude::Result {
        let property_type: PropertyType = serde_json::from_str(r#""estate""#)?;
        assert_eq!(property_type, PropertyType::Estate);
        Ok(())
    }
}
