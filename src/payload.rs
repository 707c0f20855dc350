use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A JSON value whose serialization is put off until the response is built.
///
/// Producing the value may fail or even panic; both are only observed inside
/// [`HtmxResponse::build`](crate::HtmxResponse::build).
pub(crate) struct Payload(Box<dyn FnOnce() -> serde_json::Result<Value> + Send>);

impl Payload {
    pub(crate) fn new<T>(value: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        Self(Box::new(move || serde_json::to_value(value)))
    }

    pub(crate) fn with<F, T>(produce: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        T: Serialize,
    {
        Self(Box::new(move || serde_json::to_value(produce())))
    }

    pub(crate) fn resolve(self) -> serde_json::Result<Value> {
        (self.0)()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}
