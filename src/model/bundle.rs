use std::fmt::Debug;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::features::FeatureSchema;
use crate::model::ensemble::{EnsembleDump, TreeEnsemble};
use crate::model::error::LoadError;
use crate::prelude::*;

/// On-disk bundle: `{"model": …, "columns": […]}`.
#[derive(Serialize, Deserialize, Default)]
pub struct BundleDump {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<EnsembleDump>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

/// Trained model together with the exact feature layout it expects.
///
/// Constructed once at startup and shared read-only afterwards.
#[derive(Debug)]
pub struct ModelBundle {
    model: TreeEnsemble,
    schema: FeatureSchema,
}

impl ModelBundle {
    /// Loads the bundle, picking the decoder by the file extension.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: impl AsRef<Path> + Debug) -> Result<Self, LoadError> {
        let start_instant = Instant::now();
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bundle = match path.extension().and_then(|extension| extension.to_str()) {
            Some("json") => Self::from_json_slice(&bytes)?,
            _ => Self::from_pickle_slice(&bytes)?,
        };
        info!(
            n_columns = bundle.schema.len(),
            n_features = bundle.model.n_features(),
            n_trees = bundle.model.n_trees(),
            elapsed = ?start_instant.elapsed(),
            "loaded the model",
        );
        Ok(bundle)
    }

    pub fn from_pickle_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        Self::from_dump(serde_pickle::from_slice(bytes, Default::default())?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        Self::from_dump(serde_json::from_slice(bytes)?)
    }

    pub fn from_dump(dump: BundleDump) -> Result<Self, LoadError> {
        let columns = dump.columns.ok_or(LoadError::MissingKey("columns"))?;
        let model = dump.model.ok_or(LoadError::MissingKey("model"))?;
        let schema = FeatureSchema::new(columns);
        if schema.is_empty() {
            return Err(LoadError::Invalid("the column list is empty".to_string()));
        }
        let model = TreeEnsemble::from_dump(model, schema.len())?;
        Ok(Self { model, schema })
    }

    #[must_use]
    pub const fn model(&self) -> &TreeEnsemble {
        &self.model
    }

    #[must_use]
    pub const fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::fixtures;

    #[test]
    fn from_json_slice_ok() -> Result {
        let bundle = ModelBundle::from_json_slice(&serde_json::to_vec(&fixtures::bundle_json())?)?;
        assert_eq!(bundle.schema().len(), 7);
        assert_eq!(bundle.model().n_features(), 7);
        Ok(())
    }

    #[test]
    fn from_pickle_slice_ok() -> Result {
        let dump: BundleDump = serde_json::from_value(fixtures::bundle_json())?;
        let bytes = serde_pickle::to_vec(&dump, Default::default())?;
        let bundle = ModelBundle::from_pickle_slice(&bytes)?;
        assert_eq!(
            bundle.schema().names().collect::<Vec<_>>(),
            fixtures::COLUMNS.to_vec(),
        );
        Ok(())
    }

    #[test]
    fn load_json_file_ok() -> Result {
        let path = std::env::temp_dir().join(format!("home-price-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_vec(&fixtures::bundle_json())?)?;
        let result = ModelBundle::load(&path);
        std::fs::remove_file(&path)?;
        assert_eq!(result?.schema().len(), 7);
        Ok(())
    }

    #[test]
    fn load_missing_file_error() {
        let result = ModelBundle::load("/nonexistent/xgb_log_model.pkl");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn missing_columns_error() -> Result {
        let bytes = serde_json::to_vec(&json!({ "model": fixtures::bundle_json()["model"] }))?;
        let result = ModelBundle::from_json_slice(&bytes);
        assert!(matches!(result, Err(LoadError::MissingKey("columns"))));
        Ok(())
    }

    #[test]
    fn missing_model_error() -> Result {
        let bytes = serde_json::to_vec(&json!({ "columns": fixtures::COLUMNS }))?;
        let result = ModelBundle::from_json_slice(&bytes);
        assert!(matches!(result, Err(LoadError::MissingKey("model"))));
        Ok(())
    }

    #[test]
    fn corrupt_pickle_error() {
        let result = ModelBundle::from_pickle_slice(b"\xffnot a pickle");
        assert!(matches!(result, Err(LoadError::Pickle(_))));
    }

    #[test]
    fn corrupt_json_error() {
        let result = ModelBundle::from_json_slice(br#"{"columns": ["rooms"], "model": 42}"#);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn empty_columns_error() -> Result {
        let mut bundle = fixtures::bundle_json();
        bundle["columns"] = json!([]);
        let result = ModelBundle::from_json_slice(&serde_json::to_vec(&bundle)?);
        assert!(matches!(result, Err(LoadError::Invalid(_))));
        Ok(())
    }
}
