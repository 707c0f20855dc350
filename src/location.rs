use serde::Serialize;
use serde_json::Value;

use crate::{error::HtmxError, payload::Payload, reswap::Reswap};

/// Target of an `HX-Location` client-side redirect.
///
/// With only a path the header is the bare path. Once any property is set
/// the header becomes a JSON object holding the path and the set properties.
#[derive(Debug)]
pub struct Location {
    path: String,
    source: Option<String>,
    event: Option<String>,
    handler: Option<String>,
    target: Option<String>,
    swap: Option<Reswap>,
    values: Option<Payload>,
    headers: Option<Payload>,
    select: Option<String>,
}

#[derive(Serialize)]
struct LocationJson<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handler: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swap: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    select: Option<&'a str>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: None,
            event: None,
            handler: None,
            target: None,
            swap: None,
            values: None,
            headers: None,
            select: None,
        }
    }

    /// The source element of the request.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The event that triggered the request.
    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// A callback that will handle the response HTML.
    pub fn handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// The target to swap the response into.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn swap(mut self, swap: impl Into<Reswap>) -> Self {
        self.swap = Some(swap.into());
        self
    }

    /// Values to submit with the request.
    pub fn values<T>(mut self, values: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        self.values = Some(Payload::new(values));
        self
    }

    /// Headers to submit with the request.
    pub fn headers<T>(mut self, headers: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        self.headers = Some(Payload::new(headers));
        self
    }

    /// Selects the content to swap in from the response.
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    fn is_bare(&self) -> bool {
        self.source.is_none()
            && self.event.is_none()
            && self.handler.is_none()
            && self.target.is_none()
            && self.swap.is_none()
            && self.values.is_none()
            && self.headers.is_none()
            && self.select.is_none()
    }

    pub(crate) fn into_header_value(self) -> Result<String, HtmxError> {
        if self.is_bare() {
            return Ok(self.path);
        }

        let values = self
            .values
            .map(Payload::resolve)
            .transpose()
            .map_err(|e| HtmxError::serialize("location values", e))?;
        let headers = self
            .headers
            .map(Payload::resolve)
            .transpose()
            .map_err(|e| HtmxError::serialize("location headers", e))?;

        let json = LocationJson {
            path: &self.path,
            source: self.source.as_deref(),
            event: self.event.as_deref(),
            handler: self.handler.as_deref(),
            target: self.target.as_deref(),
            swap: self.swap.as_ref().map(Reswap::as_str),
            values,
            headers,
            select: self.select.as_deref(),
        };
        serde_json::to_string(&json).map_err(|e| HtmxError::serialize("location", e))
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::new(path)
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Location::new(path)
    }
}
