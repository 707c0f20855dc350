//! Helpers for reading HTMX request headers and writing HTMX response headers.
//!
//! Request headers are read through [`HeaderSource`], which any framework's
//! request type can implement. Response headers are composed from a list of
//! [`HxOption`]s into an [`HtmxResponse`], which the framework integrations in
//! [`frameworks`] then copy onto a live response.
//!
//! ```
//! use htmx_headers::{HtmxResponse, HxOption, Location, Reswap};
//!
//! let response = HtmxResponse::build([
//!     HxOption::location(Location::new("/foo")),
//!     Reswap::OUTER_HTML.focus_scroll(false).into(),
//! ])
//! .unwrap();
//!
//! assert_eq!(response.header("HX-Location"), Some("/foo"));
//! assert_eq!(response.header("HX-Reswap"), Some("outerHTML focus-scroll:false"));
//! ```

pub mod error;
pub mod frameworks;
pub mod headers;
pub mod location;
mod payload;
pub mod request;
pub mod response;
pub mod reswap;
pub mod settings;
pub mod trigger;

pub use error::HtmxError;
pub use location::Location;
pub use request::{
    HeaderSource, HxRequest, current_url, is_boosted, is_history_restore_request, is_htmx,
    is_request, prompt, target, trigger, trigger_name,
};
pub use response::{HtmxResponse, HxOption};
pub use reswap::Reswap;
pub use settings::WriterSettings;
pub use trigger::{Event, Trigger};
