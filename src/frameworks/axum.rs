//! axum integration.
//!
//! ```no_run
//! use axum::{Router, routing::post};
//! use htmx_headers::{Event, HtmxError, HtmxResponse, HxOption, HxRequest};
//!
//! async fn save(hx: HxRequest) -> Result<HtmxResponse, HtmxError> {
//!     HtmxResponse::build([
//!         HxOption::trigger(Event::new("saved").value(hx.target)),
//!         HxOption::push_url("/items"),
//!     ])
//! }
//!
//! let app: Router = Router::new().route("/items", post(save));
//! ```

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use tracing::error;
use uuid::Uuid;

use crate::{error::HtmxError, request::HxRequest, response::HtmxResponse};

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(HxRequest::from_headers(&parts.headers))
    }
}

/// Headers only. Parts cannot carry a status, so pair the response with a
/// [`StatusCode`] or return it directly when the status matters.
impl IntoResponseParts for HtmxResponse {
    type Error = HtmxError;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        res.headers_mut().extend(self.header_map()?);
        Ok(res)
    }
}

/// An empty body with the staged headers, and the staged status if one was set.
impl IntoResponse for HtmxResponse {
    fn into_response(self) -> Response {
        let headers = match self.header_map() {
            Ok(headers) => headers,
            Err(e) => return e.into_response(),
        };

        match self.status() {
            Some(status) => (status, headers).into_response(),
            None => headers.into_response(),
        }
    }
}

impl IntoResponse for HtmxError {
    fn into_response(self) -> Response {
        let id = Uuid::new_v4();
        error!("Error trace id: {} for {:#}", id, self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong, trace id: {id}"),
        )
            .into_response()
    }
}
