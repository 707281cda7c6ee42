use thiserror::Error;

use crate::core::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("user {0} not found")]
    UserNotFound(i64),
    #[error("missing string [{key}, {component}]")]
    MissingString { key: String, component: String },
    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("failed to dispatch {event} event")]
    EventDispatch {
        event: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("field '{0}' is not available")]
    FieldNotFound(String),
    #[error("{context}")]
    Host {
        context: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to load string catalog from {path}")]
    CatalogLoad {
        path: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to inspect host object: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Wraps a collaborator failure, logging it with `context`.
    pub(crate) fn host(err: anyhow::Error, context: &'static str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Host { context, source: err }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
