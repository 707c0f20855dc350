use http::{header::InvalidHeaderName, header::InvalidHeaderValue, status::InvalidStatusCode};
use thiserror::Error;

/// Building an HTMX response failed. Nothing was written to the live response.
#[derive(Debug, Error)]
pub enum HtmxError {
    #[error("unable to serialize {field}: {source}")]
    Serialize {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    /// An option panicked while it was being evaluated.
    #[error("{0}")]
    Aborted(String),
    #[error("invalid value for {name}: {source}")]
    HeaderValue {
        name: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },
    #[error(transparent)]
    HeaderName(#[from] InvalidHeaderName),
    #[error(transparent)]
    Status(#[from] InvalidStatusCode),
}

impl HtmxError {
    pub(crate) fn serialize(field: impl Into<String>, source: serde_json::Error) -> Self {
        HtmxError::Serialize {
            field: field.into(),
            source,
        }
    }
}
