use std::{
    any::Any,
    collections::BTreeMap,
    panic::{self, AssertUnwindSafe},
};

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tracing::{debug, warn};

use crate::{
    error::HtmxError,
    headers::{
        HX_LOCATION, HX_PUSH_URL, HX_REDIRECT, HX_REFRESH, HX_REPLACE_URL, HX_RESELECT,
        HX_RESWAP, HX_RETARGET, HX_TRIGGER, HX_TRIGGER_AFTER_SETTLE, HX_TRIGGER_AFTER_SWAP,
        STATUS_STOP_POLLING,
    },
    location::Location,
    reswap::Reswap,
    trigger::Trigger,
};

/// One change to an HTMX response. Options are applied in the order given
/// and a later option replaces an earlier one writing the same header.
#[derive(Debug)]
pub enum HxOption {
    Status(StatusCode),
    /// Status 286, which stops a polling element. Wins over any [`HxOption::Status`].
    StopPolling,
    /// Client-side redirect without a full page reload.
    Location(Location),
    PushUrl(String),
    /// Client-side redirect with a full page reload.
    Redirect(String),
    Refresh,
    ReplaceUrl(String),
    Reswap(Reswap),
    Retarget(String),
    Reselect(String),
    Trigger(Trigger),
    TriggerAfterSettle(Trigger),
    TriggerAfterSwap(Trigger),
}

impl HxOption {
    pub fn status(code: StatusCode) -> Self {
        HxOption::Status(code)
    }

    pub fn stop_polling() -> Self {
        HxOption::StopPolling
    }

    pub fn location(location: impl Into<Location>) -> Self {
        HxOption::Location(location.into())
    }

    pub fn push_url(url: impl Into<String>) -> Self {
        HxOption::PushUrl(url.into())
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        HxOption::Redirect(url.into())
    }

    pub fn refresh() -> Self {
        HxOption::Refresh
    }

    pub fn replace_url(url: impl Into<String>) -> Self {
        HxOption::ReplaceUrl(url.into())
    }

    pub fn reswap(swap: impl Into<Reswap>) -> Self {
        HxOption::Reswap(swap.into())
    }

    pub fn retarget(selector: impl Into<String>) -> Self {
        HxOption::Retarget(selector.into())
    }

    pub fn reselect(selector: impl Into<String>) -> Self {
        HxOption::Reselect(selector.into())
    }

    pub fn trigger(events: impl Into<Trigger>) -> Self {
        HxOption::Trigger(events.into())
    }

    pub fn trigger_after_settle(events: impl Into<Trigger>) -> Self {
        HxOption::TriggerAfterSettle(events.into())
    }

    pub fn trigger_after_swap(events: impl Into<Trigger>) -> Self {
        HxOption::TriggerAfterSwap(events.into())
    }

    fn apply(self, response: &mut HtmxResponse) -> Result<(), HtmxError> {
        match self {
            HxOption::Status(code) => {
                if response.stop_polling {
                    debug!("Ignoring status {code}, polling is already stopped");
                } else {
                    response.status = Some(code);
                }
            }
            HxOption::StopPolling => {
                response.status = Some(StatusCode::from_u16(STATUS_STOP_POLLING)?);
                response.stop_polling = true;
            }
            HxOption::Location(location) => {
                response.set(HX_LOCATION, location.into_header_value()?)
            }
            HxOption::PushUrl(url) => response.set(HX_PUSH_URL, url),
            HxOption::Redirect(url) => response.set(HX_REDIRECT, url),
            HxOption::Refresh => response.set(HX_REFRESH, "true".to_string()),
            HxOption::ReplaceUrl(url) => response.set(HX_REPLACE_URL, url),
            HxOption::Reswap(swap) => response.set(HX_RESWAP, swap.to_string()),
            HxOption::Retarget(selector) => response.set(HX_RETARGET, selector),
            HxOption::Reselect(selector) => response.set(HX_RESELECT, selector),
            HxOption::Trigger(events) => response.set(HX_TRIGGER, events.into_header_value()?),
            HxOption::TriggerAfterSettle(events) => {
                response.set(HX_TRIGGER_AFTER_SETTLE, events.into_header_value()?)
            }
            HxOption::TriggerAfterSwap(events) => {
                response.set(HX_TRIGGER_AFTER_SWAP, events.into_header_value()?)
            }
        }
        Ok(())
    }
}

impl From<Reswap> for HxOption {
    fn from(swap: Reswap) -> Self {
        HxOption::Reswap(swap)
    }
}

impl From<Location> for HxOption {
    fn from(location: Location) -> Self {
        HxOption::Location(location)
    }
}

impl From<StatusCode> for HxOption {
    fn from(code: StatusCode) -> Self {
        HxOption::Status(code)
    }
}

/// The HTMX headers and status staged for one response.
///
/// Build it with [`HtmxResponse::build`], then hand it to one of the
/// [`frameworks`](crate::frameworks) integrations to write it out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmxResponse {
    headers: BTreeMap<&'static str, String>,
    status: Option<StatusCode>,
    stop_polling: bool,
}

impl HtmxResponse {
    /// Applies `options` in order to a fresh response.
    ///
    /// A payload that fails to serialize, or an option that panics while it
    /// is evaluated, turns into an error instead of a partial response.
    pub fn build<I>(options: I) -> Result<HtmxResponse, HtmxError>
    where
        I: IntoIterator,
        I::Item: Into<HxOption>,
    {
        let built = panic::catch_unwind(AssertUnwindSafe(move || -> Result<_, HtmxError> {
            let mut response = HtmxResponse::default();
            for option in options {
                let option: HxOption = option.into();
                option.apply(&mut response)?;
            }
            Ok(response)
        }));

        match built {
            Ok(Ok(response)) => {
                debug!(
                    "Built htmx response with {} headers, status {:?}",
                    response.headers.len(),
                    response.status
                );
                Ok(response)
            }
            Ok(Err(e)) => Err(e),
            Err(cause) => {
                let message = panic_message(&*cause);
                warn!("Recovered from a panic while building an htmx response: {message}");
                Err(HtmxError::Aborted(message))
            }
        }
    }

    fn set(&mut self, name: &'static str, value: String) {
        self.headers.insert(name, value);
    }

    /// The staged status, if any option set one.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.headers.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.status.is_none()
    }

    /// Converts the staged headers into an [`HeaderMap`], checking that every
    /// value is legal in an HTTP header.
    pub fn header_map(&self) -> Result<HeaderMap, HtmxError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (&name, value) in &self.headers {
            let value = HeaderValue::from_bytes(value.as_bytes())
                .map_err(|source| HtmxError::HeaderValue { name, source })?;
            map.insert(HeaderName::from_bytes(name.as_bytes())?, value);
        }
        Ok(map)
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else if let Some(error) = cause.downcast_ref::<HtmxError>() {
        error.to_string()
    } else {
        "htmx response option panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::{Value, json};
    use tracing_test::traced_test;

    use super::*;
    use crate::trigger::Event;

    #[test]
    fn status() -> anyhow::Result<()> {
        let r = HtmxResponse::build([HxOption::status(StatusCode::OK)])?;
        assert_eq!(r.status(), Some(StatusCode::OK));
        assert_eq!(r.headers().count(), 0);

        let r = HtmxResponse::build([HxOption::stop_polling()])?;
        assert_eq!(r.status().map(|s| s.as_u16()), Some(286));

        Ok(())
    }

    #[test]
    fn stop_polling_wins() -> anyhow::Result<()> {
        let before = HtmxResponse::build([
            HxOption::status(StatusCode::ACCEPTED),
            HxOption::stop_polling(),
        ])?;
        let after = HtmxResponse::build([
            HxOption::stop_polling(),
            HxOption::status(StatusCode::ACCEPTED),
            HxOption::location("/foo"),
        ])?;

        assert_eq!(before.status().map(|s| s.as_u16()), Some(286));
        assert_eq!(after.status().map(|s| s.as_u16()), Some(286));
        assert_eq!(after.header("HX-Location"), Some("/foo"));

        Ok(())
    }

    #[test]
    fn no_options() -> anyhow::Result<()> {
        let r = HtmxResponse::build(Vec::<HxOption>::new())?;
        assert!(r.is_empty());
        assert_eq!(r.status(), None);
        Ok(())
    }

    #[test]
    fn simple_headers() -> anyhow::Result<()> {
        let cases = [
            (HxOption::push_url("/foo"), "HX-Push-Url", "/foo"),
            (HxOption::redirect("/foo"), "HX-Redirect", "/foo"),
            (HxOption::refresh(), "HX-Refresh", "true"),
            (HxOption::replace_url("/foo"), "HX-Replace-Url", "/foo"),
            (HxOption::reselect("#foo"), "HX-Reselect", "#foo"),
            (HxOption::retarget("#foo"), "HX-Retarget", "#foo"),
            (HxOption::reswap("innerHTML"), "HX-Reswap", "innerHTML"),
        ];

        for (option, name, value) in cases {
            let r = HtmxResponse::build([option])?;
            let headers: Vec<_> = r.headers().collect();
            assert_eq!(headers, vec![(name, value)]);
            assert_eq!(r.status(), None);
        }

        Ok(())
    }

    #[test]
    fn status_and_headers() -> anyhow::Result<()> {
        let r = HtmxResponse::build([
            HxOption::status(StatusCode::ACCEPTED),
            HxOption::location("/foo"),
            Reswap::OUTER_HTML.focus_scroll(false).into(),
        ])?;

        assert_eq!(r.status(), Some(StatusCode::ACCEPTED));
        let headers: HashMap<_, _> = r.headers().collect();
        assert_eq!(
            headers,
            HashMap::from([
                ("HX-Location", "/foo"),
                ("HX-Reswap", "outerHTML focus-scroll:false"),
            ])
        );

        Ok(())
    }

    #[test]
    fn last_write_wins() -> anyhow::Result<()> {
        let r = HtmxResponse::build([
            HxOption::location("/foo"),
            Reswap::OUTER_HTML.focus_scroll(true).into(),
            HxOption::location("/bar"),
        ])?;

        assert_eq!(r.header("HX-Location"), Some("/bar"));
        assert_eq!(r.header("hx-reswap"), Some("outerHTML focus-scroll:true"));
        assert_eq!(r.headers().count(), 2);

        Ok(())
    }

    #[test]
    fn trigger_headers() -> anyhow::Result<()> {
        let r = HtmxResponse::build([
            HxOption::trigger(Event::new("e").value(HashMap::from([("k", "v")]))),
            HxOption::trigger_after_settle(Event::new("settled")),
            HxOption::trigger_after_swap([Event::new("a").value(1), Event::new("b")]),
        ])?;

        let decode = |name| -> anyhow::Result<Value> {
            let header = r
                .header(name)
                .ok_or_else(|| anyhow::anyhow!("missing {name}"))?;
            Ok(serde_json::from_str(header)?)
        };
        assert_eq!(decode("HX-Trigger")?, json!({"e": {"k": "v"}}));
        assert_eq!(decode("HX-Trigger-After-Settle")?, json!({"settled": null}));
        assert_eq!(decode("HX-Trigger-After-Swap")?, json!({"a": 1, "b": null}));

        Ok(())
    }

    #[test]
    fn unserializable_event() {
        let err = HtmxResponse::build([
            HxOption::location("/foo"),
            HxOption::trigger(Event::new("bad").value(HashMap::from([((1, 2), "v")]))),
        ])
        .unwrap_err();

        assert!(matches!(err, HtmxError::Serialize { .. }));
        assert!(err.to_string().contains("key must be a string"));
    }

    #[test]
    #[traced_test]
    fn panics_and_recovers() {
        let err = HtmxResponse::build([
            HxOption::location("/foo"),
            HxOption::trigger(Event::new("bad").value_with(|| -> Value {
                panic!("bad event data")
            })),
        ])
        .unwrap_err();

        assert!(matches!(err, HtmxError::Aborted(_)));
        assert_eq!(err.to_string(), "bad event data");
        assert!(logs_contain("Recovered from a panic"));
    }

    #[test]
    fn panic_with_formatted_message() {
        let id = 7;
        let err = HtmxResponse::build([HxOption::trigger(
            Event::new("bad").value_with(move || -> Value { panic!("bad event {id}") }),
        )])
        .unwrap_err();

        assert_eq!(err.to_string(), "bad event 7");
    }

    #[test]
    fn header_map() -> anyhow::Result<()> {
        let r = HtmxResponse::build([HxOption::redirect("/foo"), HxOption::refresh()])?;
        let map = r.header_map()?;

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("hx-redirect").map(|v| v.as_bytes()), Some(&b"/foo"[..]));
        assert_eq!(map.get("HX-Refresh").map(|v| v.as_bytes()), Some(&b"true"[..]));

        Ok(())
    }

    #[test]
    fn header_map_rejects_control_characters() -> anyhow::Result<()> {
        let r = HtmxResponse::build([HxOption::redirect("/foo\r\nSet-Cookie: x")])?;

        let err = r.header_map().unwrap_err();
        assert!(matches!(
            err,
            HtmxError::HeaderValue {
                name: "HX-Redirect",
                ..
            }
        ));

        Ok(())
    }
}
