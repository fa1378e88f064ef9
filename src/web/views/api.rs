use poem::error::BadRequest;
use poem::http::StatusCode;
use poem::web::{Data, Json, Query};
use poem::{handler, IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::features::{Location, PropertyType, UserInput};
use crate::importance::{top_importances, FeatureImportance, DEFAULT_TOP};
use crate::model::ModelBundle;
use crate::prediction::estimate;
use crate::prelude::*;

const CACHE_CONTROL: &str = "no-cache";

#[derive(Deserialize, Debug)]
pub struct PredictRequest {
    pub living_area_m2: f64,

    #[serde(default)]
    pub land_area_m2: f64,

    pub rooms: u32,

    #[serde(default)]
    pub property_type: PropertyType,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<PredictRequest> for UserInput {
    fn from(request: PredictRequest) -> Self {
        Self {
            living_area_m2: request.living_area_m2,
            land_area_m2: request.land_area_m2,
            rooms: request.rooms,
            property_type: request.property_type,
            location: Location::from_click(request.latitude, request.longitude),
        }
    }
}

#[derive(Serialize)]
pub struct PredictResponse {
    pub price: f64,
    pub log_price: f64,
    pub formatted: String,
}

#[handler]
#[instrument(level = "info", skip_all)]
pub async fn post_predict(
    Json(request): Json<PredictRequest>,
    Data(bundle): Data<&Arc<ModelBundle>>,
) -> poem::Result<Json<PredictResponse>> {
    let input = UserInput::from(request).validated().map_err(BadRequest)?;
    let prediction = estimate(bundle, &input).context("failed to estimate the price")?;
    info!(?input.property_type, prediction.price);
    Ok(Json(PredictResponse {
        price: prediction.price,
        log_price: prediction.log_price,
        formatted: prediction.formatted(),
    }))
}

#[derive(Deserialize)]
pub struct ImportanceQuery {
    #[serde(default = "default_top")]
    pub top: usize,
}

const fn default_top() -> usize {
    DEFAULT_TOP
}

#[handler]
#[instrument(level = "info", skip_all)]
pub async fn get_importance(
    Query(query): Query<ImportanceQuery>,
    Data(bundle): Data<&Arc<ModelBundle>>,
) -> Json<Vec<FeatureImportance>> {
    Json(top_importances(bundle, query.top))
}

#[handler]
pub async fn get_health() -> Response {
    StatusCode::NO_CONTENT
        .with_header("Cache-Control", CACHE_CONTROL)
        .into_response()
}
