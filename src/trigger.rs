use serde::Serialize;
use serde_json::{Map, Value};

use crate::{error::HtmxError, payload::Payload};

/// A client-side event for the `HX-Trigger*` response headers.
///
/// An event without values is sent as `null`, with one value as that value,
/// and with several values as an array of them.
#[derive(Debug)]
pub struct Event {
    name: String,
    values: Vec<Payload>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value<T>(mut self, value: T) -> Self
    where
        T: Serialize + Send + 'static,
    {
        self.values.push(Payload::new(value));
        self
    }

    /// Adds a value that is only computed when the response is built.
    pub fn value_with<F, T>(mut self, produce: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        T: Serialize,
    {
        self.values.push(Payload::with(produce));
        self
    }

    fn resolve(self) -> Result<(String, Value), HtmxError> {
        let mut values = Vec::with_capacity(self.values.len());
        for payload in self.values {
            let value = payload
                .resolve()
                .map_err(|e| HtmxError::serialize(format!("event {}", self.name), e))?;
            values.push(value);
        }

        let value = match values.len() {
            0 => Value::Null,
            1 => values.swap_remove(0),
            _ => Value::Array(values),
        };
        Ok((self.name, value))
    }
}

/// A set of events sent together in one trigger header.
///
/// Key order in the encoded object is not guaranteed. An event named twice
/// keeps the later value.
#[derive(Debug, Default)]
pub struct Trigger(Vec<Event>);

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, event: Event) -> Self {
        self.0.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_header_value(self) -> Result<String, HtmxError> {
        let mut events = Map::new();
        for event in self.0 {
            let (name, value) = event.resolve()?;
            events.insert(name, value);
        }
        serde_json::to_string(&events).map_err(|e| HtmxError::serialize("trigger events", e))
    }
}

impl From<Event> for Trigger {
    fn from(event: Event) -> Self {
        Trigger(vec![event])
    }
}

impl From<Vec<Event>> for Trigger {
    fn from(events: Vec<Event>) -> Self {
        Trigger(events)
    }
}

impl<const N: usize> From<[Event; N]> for Trigger {
    fn from(events: [Event; N]) -> Self {
        Trigger(events.into())
    }
}

impl FromIterator<Event> for Trigger {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Trigger(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    struct Detail {
        k: String,
    }

    fn decode(trigger: impl Into<Trigger>) -> anyhow::Result<Value> {
        let header = trigger.into().into_header_value()?;
        assert!(!header.is_empty());
        Ok(serde_json::from_str(&header)?)
    }

    #[test]
    fn named_event() -> anyhow::Result<()> {
        assert_eq!(decode(Event::new("myEvent"))?, json!({"myEvent": null}));
        Ok(())
    }

    #[test]
    fn single_value() -> anyhow::Result<()> {
        assert_eq!(
            decode(Event::new("myEvent").value("myValue"))?,
            json!({"myEvent": "myValue"})
        );
        Ok(())
    }

    #[test]
    fn multiple_values() -> anyhow::Result<()> {
        let event = Event::new("myEvent").value("myValue1").value("myValue2");
        assert_eq!(decode(event)?, json!({"myEvent": ["myValue1", "myValue2"]}));
        Ok(())
    }

    #[test]
    fn structured_values() -> anyhow::Result<()> {
        let from_struct = Event::new("myEvent").value(Detail { k: "v".to_string() });
        assert_eq!(decode(from_struct)?, json!({"myEvent": {"k": "v"}}));

        let from_map = Event::new("myEvent").value(HashMap::from([("k", "v")]));
        assert_eq!(decode(from_map)?, json!({"myEvent": {"k": "v"}}));

        Ok(())
    }

    #[test]
    fn multiple_events() -> anyhow::Result<()> {
        let trigger = Trigger::new()
            .event(Event::new("myEvent"))
            .event(Event::new("myOtherEvent").value("myValue"))
            .event(Event::new("myStructEvent").value(Detail { k: "v".to_string() }))
            .event(Event::new("myMapEvent").value(HashMap::from([("k", "v")])));

        assert_eq!(
            decode(trigger)?,
            json!({
                "myEvent": null,
                "myOtherEvent": "myValue",
                "myStructEvent": {"k": "v"},
                "myMapEvent": {"k": "v"}
            })
        );
        Ok(())
    }

    #[test]
    fn repeated_name_keeps_last() -> anyhow::Result<()> {
        let trigger = [
            Event::new("saved").value(1),
            Event::new("saved").value(2),
        ];
        assert_eq!(decode(trigger)?, json!({"saved": 2}));
        Ok(())
    }

    #[test]
    fn lazy_value() -> anyhow::Result<()> {
        let event = Event::new("counted").value_with(|| vec![1, 2, 3]);
        assert_eq!(event.name(), "counted");
        assert_eq!(decode(event)?, json!({"counted": [1, 2, 3]}));
        Ok(())
    }

    #[test]
    fn unserializable_value() {
        let trigger = Trigger::from(Event::new("bad").value(HashMap::from([((1, 2), "v")])));

        let err = trigger.into_header_value().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to serialize event bad: key must be a string"
        );
    }
}
