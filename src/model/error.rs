use std::path::PathBuf;

/// Model bundle could not be loaded. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode the pickled bundle")]
    Pickle(#[from] serde_pickle::Error),

    #[error("failed to decode the JSON bundle")]
    Json(#[from] serde_json::Error),

    #[error("the bundle has no `{0}` key")]
    MissingKey(&'static str),

    #[error("invalid model: {0}")]
    Invalid(String),
}

/// Feature vector width does not match the model.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("the model expects {expected} features, got {actual}")]
pub struct ShapeMismatchError {
    pub expected: usize,
    pub actual: usize,
}
