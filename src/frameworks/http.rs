use http::{HeaderMap, Request, Response, request::Parts};

use crate::{
    error::HtmxError,
    request::HeaderSource,
    response::{HtmxResponse, HxOption},
    settings::WriterSettings,
};

impl HeaderSource for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        // UTF-8 rather than `to_str` so that prompts typed by users survive.
        self.get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }
}

impl<B> HeaderSource for Request<B> {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().header(name)
    }
}

impl HeaderSource for Parts {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.header(name)
    }
}

/// Writes built HTMX responses onto `http` responses.
#[derive(Clone, Debug, Default)]
pub struct ResponseWriter {
    settings: WriterSettings,
}

impl ResponseWriter {
    pub fn new(settings: WriterSettings) -> Self {
        Self { settings }
    }

    /// Builds `options` and copies the result onto `response`.
    ///
    /// The status is only written when one was set and the settings allow
    /// it. If building fails `response` is left untouched.
    pub fn write<B, I>(
        &self,
        response: &mut Response<B>,
        options: I,
    ) -> Result<HtmxResponse, HtmxError>
    where
        I: IntoIterator,
        I::Item: Into<HxOption>,
    {
        let hx = HtmxResponse::build(options)?;
        let headers = hx.header_map()?;

        response.headers_mut().extend(headers);
        if self.settings.write_status
            && let Some(status) = hx.status()
        {
            *response.status_mut() = status;
        }

        Ok(hx)
    }

    /// Builds `options` and copies only the headers into `headers`.
    pub fn write_headers<I>(
        &self,
        headers: &mut HeaderMap,
        options: I,
    ) -> Result<HtmxResponse, HtmxError>
    where
        I: IntoIterator,
        I::Item: Into<HxOption>,
    {
        let hx = HtmxResponse::build(options)?;
        headers.extend(hx.header_map()?);
        Ok(hx)
    }
}

/// [`ResponseWriter::write`] with the default settings.
pub fn write_response<B, I>(response: &mut Response<B>, options: I) -> Result<HtmxResponse, HtmxError>
where
    I: IntoIterator,
    I::Item: Into<HxOption>,
{
    ResponseWriter::default().write(response, options)
}
