use serde::Deserialize;

use crate::features::{InvalidInput, Location, PropertyType, UserInput};

/// Query string of the form page: the widget state on every submit.
#[derive(Deserialize, Debug)]
pub struct EstimateForm {
    #[serde(default)]
    pub living_area: f64,

    #[serde(default)]
    pub land_area: f64,

    #[serde(default = "default_rooms")]
    pub rooms: u32,

    #[serde(default)]
    pub property_type: PropertyType,

    /// Last clicked map location.
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// The estimate button has been pressed.
    #[serde(default)]
    pub predict: bool,

    /// The feature importance checkbox is on.
    #[serde(default)]
    pub importance: bool,
}

const fn default_rooms() -> u32 {
    UserInput::MIN_ROOMS
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self {
            living_area: 0.0,
            land_area: 0.0,
            rooms: default_rooms(),
            property_type: PropertyType::default(),
            latitude: None,
            longitude: None,
            predict: false,
            importance: false,
        }
    }
}

impl EstimateForm {
    pub fn user_input(&self) -> Result<UserInput, InvalidInput> {
        UserInput {
            living_area_m2: self.living_area,
            land_area_m2: self.land_area,
            rooms: self.rooms,
            property_type: self.property_type,
            location: Location::from_click(self.latitude, self.longitude),
        }
        .validated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ok() -> crate::prelude::Result {
        let input = EstimateForm::default().user_input()?;
        assert_eq!(input.rooms, 1);
        assert_eq!(input.property_type, PropertyType::House);
        assert_eq!(input.location, Location::DEFAULT);
        Ok(())
    }

    #[test]
    fn invalid_rooms_error() {
        let form = EstimateForm {
            rooms: 0,
            ..Default::default()
        };
        assert_eq!(form.user_input(), Err(InvalidInput::Rooms { value: 0 }));
    }
}
