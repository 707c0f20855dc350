use crate::headers::{
    HX_BOOSTED, HX_CURRENT_URL, HX_HISTORY_RESTORE_REQUEST, HX_PROMPT, HX_REQUEST, HX_TARGET,
    HX_TRIGGER, HX_TRIGGER_NAME,
};

/// Anything that can look up a request header by name, ignoring case.
///
/// This is the only capability the readers below need, so each framework
/// integration implements it once for its own request type.
pub trait HeaderSource {
    fn header(&self, name: &str) -> Option<&str>;
}

impl<T> HeaderSource for &T
where
    T: HeaderSource + ?Sized,
{
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }
}

fn present<S: HeaderSource + ?Sized>(source: &S, name: &str) -> bool {
    source.header(name).is_some_and(|v| !v.is_empty())
}

/// True only when `HX-Boosted` is exactly `"true"`.
pub fn is_boosted<S: HeaderSource + ?Sized>(source: &S) -> bool {
    source.header(HX_BOOSTED) == Some("true")
}

/// The browser's current URL from `HX-Current-URL`, or `""`.
pub fn current_url<S: HeaderSource + ?Sized>(source: &S) -> &str {
    source.header(HX_CURRENT_URL).unwrap_or_default()
}

/// True when `HX-History-Restore-Request` is present with any value.
pub fn is_history_restore_request<S: HeaderSource + ?Sized>(source: &S) -> bool {
    present(source, HX_HISTORY_RESTORE_REQUEST)
}

/// The user's answer to an `hx-prompt` from `HX-Prompt`, or `""`.
pub fn prompt<S: HeaderSource + ?Sized>(source: &S) -> &str {
    source.header(HX_PROMPT).unwrap_or_default()
}

/// True when `HX-Request` is present, i.e. the request came from HTMX.
pub fn is_request<S: HeaderSource + ?Sized>(source: &S) -> bool {
    present(source, HX_REQUEST)
}

/// Same as [`is_request`].
pub fn is_htmx<S: HeaderSource + ?Sized>(source: &S) -> bool {
    is_request(source)
}

/// The id of the target element from `HX-Target`, or `""`.
pub fn target<S: HeaderSource + ?Sized>(source: &S) -> &str {
    source.header(HX_TARGET).unwrap_or_default()
}

/// The name of the triggering element from `HX-Trigger-Name`, or `""`.
pub fn trigger_name<S: HeaderSource + ?Sized>(source: &S) -> &str {
    source.header(HX_TRIGGER_NAME).unwrap_or_default()
}

/// The id of the triggering element from `HX-Trigger`, or `""`.
pub fn trigger<S: HeaderSource + ?Sized>(source: &S) -> &str {
    source.header(HX_TRIGGER).unwrap_or_default()
}

/// Every HTMX request header read at once into owned values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HxRequest {
    pub boosted: bool,
    pub current_url: String,
    pub history_restore_request: bool,
    pub prompt: String,
    pub request: bool,
    pub target: String,
    pub trigger_name: String,
    pub trigger: String,
}

impl HxRequest {
    pub fn from_headers<S: HeaderSource + ?Sized>(source: &S) -> Self {
        Self {
            boosted: is_boosted(source),
            current_url: current_url(source).to_string(),
            history_restore_request: is_history_restore_request(source),
            prompt: prompt(source).to_string(),
            request: is_request(source),
            target: target(source).to_string(),
            trigger_name: trigger_name(source).to_string(),
            trigger: trigger(source).to_string(),
        }
    }

    pub fn is_htmx(&self) -> bool {
        self.request
    }
}
