//! Small hand-made bundle shared by the tests.

use serde_json::{json, Value};

use crate::model::ModelBundle;
use crate::prelude::*;

pub const COLUMNS: [&str; 7] = [
    "living_area",
    "land_area",
    "rooms",
    "latitude",
    "longitude",
    "typology_House",
    "typology_Apartment",
];

pub const BASE_SCORE: f64 = 14.0;

/// `14 + (living_area < 1000 ? -0.2 : 0.3) + (typology_House < 0.5 ? -0.1 : 0.1)`
pub fn bundle_json() -> Value {
    json!({
        "columns": COLUMNS,
        "model": {
            "base_score": BASE_SCORE,
            "trees": [
                {
                    "left_children": [1, -1, -1],
                    "right_children": [2, -1, -1],
                    "split_indices": [0, 0, 0],
                    "split_conditions": [1000.0, -0.2, 0.3],
                },
                {
                    "left_children": [1, -1, -1],
                    "right_children": [2, -1, -1],
                    "split_indices": [5, 0, 0],
                    "split_conditions": [0.5, -0.1, 0.1],
                    "default_left": [true, false, false],
                },
            ],
            "feature_importances": [0.4, 0.1, 0.05, 0.2, 0.15, 0.07, 0.03],
        },
    })
}

pub fn bundle() -> Result<ModelBundle> {
    Ok(ModelBundle::from_json_slice(&serde_json::to_vec(&bundle_json())?)?)
}
