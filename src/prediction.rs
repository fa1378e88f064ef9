//! Runs the model and brings its output back from log space.

use serde::Serialize;

use crate::features::{FeatureVector, UserInput};
use crate::model::{ModelBundle, ShapeMismatchError};
use crate::opts::PredictOpts;
use crate::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw model output, the model is trained on `ln(price)`.
    pub log_price: f64,

    /// Estimated price, SEK.
    pub price: f64,
}

impl Prediction {
    #[must_use]
    pub fn from_log_price(log_price: f64) -> Self {
        Self {
            log_price,
            price: log_price.exp(),
        }
    }

    /// `≈ 1,234,567 SEK`
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("≈ {} SEK", format_thousands(self.price))
    }
}

pub fn predict(bundle: &ModelBundle, vector: &FeatureVector) -> Result<Prediction, ShapeMismatchError> {
    let log_price = bundle.model().predict(vector.as_slice())?;
    Ok(Prediction::from_log_price(log_price))
}

/// Builds the feature vector and predicts the price.
#[instrument(level = "debug", skip_all)]
pub fn estimate(bundle: &ModelBundle, input: &UserInput) -> Result<Prediction, ShapeMismatchError> {
    let vector = FeatureVector::build(input, bundle.schema());
    let prediction = predict(bundle, &vector)?;
    debug!(?input, prediction.log_price, prediction.price);
    Ok(prediction)
}

/// Rounds to an integer and groups the digits by thousands with commas.
#[must_use]
pub fn format_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value.is_sign_negative() && digits.bytes().any(|digit| digit != b'0') {
        formatted.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

pub fn run(opts: PredictOpts) -> Result {
    let input = opts.user_input().validated()?;
    let bundle = ModelBundle::load(&opts.model.path)?;
    let prediction = estimate(&bundle, &input)?;
    println!("{}", prediction.formatted());
    Ok(())
}
