//! Ranks the model features by their learned importance.

use itertools::Itertools;
use serde::Serialize;

use crate::model::ModelBundle;
use crate::opts::ImportanceOpts;
use crate::prelude::*;

pub const DEFAULT_TOP: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// The `top` most important features, descending. Ties keep the column order.
pub fn top_importances(bundle: &ModelBundle, top: usize) -> Vec<FeatureImportance> {
    bundle
        .schema()
        .names()
        .zip(bundle.model().feature_importances())
        .sorted_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs))
        .take(top)
        .map(|(feature, importance)| FeatureImportance {
            feature: feature.to_string(),
            importance: *importance,
        })
        .collect()
}

pub fn run(opts: ImportanceOpts) -> Result {
    let bundle = ModelBundle::load(&opts.model.path)?;
    let importances = top_importances(&bundle, opts.top);
    let width = importances
        .iter()
        .map(|importance| importance.feature.chars().count())
        .max()
        .unwrap_or_default();
    for FeatureImportance {
        feature,
        importance,
    } in importances
    {
        println!("{:<width$}  {:.4}", feature, importance, width = width);
    }
    Ok(())
}
