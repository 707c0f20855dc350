/// Small axum app showing the request readers and response options in use.
///
/// Run with `cargo run --example server [settings.json]`.
use std::{
    env, fs, io,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use htmx_headers::{
    Event, HtmxError, HtmxResponse, HxOption, HxRequest, Location, Reswap, WriterSettings,
};
use serde::Deserialize;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Deserialize)]
#[serde(default)]
struct Settings {
    listen: String,
    polls_before_stop: u32,
    writer: WriterSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:3000".to_string(),
            polls_before_stop: 5,
            writer: WriterSettings::default(),
        }
    }
}

#[derive(Clone)]
struct AppState {
    settings: Arc<Settings>,
    polls: Arc<AtomicU32>,
}

async fn index(hx: HxRequest) -> Html<String> {
    let list = "<ul id=\"items\"></ul>";
    if hx.is_htmx() && !hx.boosted {
        return Html(list.to_string());
    }

    Html(format!(
        "<html><head><script src=\"https://unpkg.com/htmx.org@2\"></script></head>\
         <body hx-boost=\"true\">{list}\
         <button hx-post=\"/items\" hx-target=\"#items\" hx-prompt=\"Name?\">Add</button>\
         <div hx-get=\"/poll\" hx-trigger=\"every 1s\"></div></body></html>"
    ))
}

async fn add_item(hx: HxRequest) -> Result<impl IntoResponse, HtmxError> {
    let name = if hx.prompt.is_empty() {
        "unnamed".to_string()
    } else {
        hx.prompt
    };

    let response = HtmxResponse::build([
        HxOption::trigger(Event::new("itemAdded").value(name.clone())),
        Reswap::BEFORE_END
            .settle(Duration::from_millis(250))
            .show("#items:bottom")
            .into(),
    ])?;
    Ok((StatusCode::CREATED, response, Html(format!("<li>{name}</li>"))))
}

async fn poll(State(state): State<AppState>) -> Result<HtmxResponse, HtmxError> {
    let count = state.polls.fetch_add(1, Ordering::Relaxed) + 1;
    if count >= state.settings.polls_before_stop {
        info!("Stopping the poller after {count} polls");
        return HtmxResponse::build([
            HxOption::stop_polling(),
            HxOption::trigger_after_swap(Event::new("pollingStopped").value(count)),
        ]);
    }

    HtmxResponse::build([HxOption::trigger(Event::new("polled").value(count))])
}

async fn moved() -> Result<HtmxResponse, HtmxError> {
    HtmxResponse::build([HxOption::location(
        Location::new("/").target("#items").swap(Reswap::INNER_HTML),
    )])
}

async fn raw(State(state): State<AppState>) -> Result<axum::response::Response, HtmxError> {
    let writer = htmx_headers::frameworks::http::ResponseWriter::new(state.settings.writer.clone());
    let mut response = Html("<p>written by hand</p>").into_response();
    writer.write(
        &mut response,
        [HxOption::status(StatusCode::ACCEPTED), HxOption::refresh()],
    )?;
    Ok(response)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings: Settings = match env::args().nth(1) {
        Some(path) => {
            let config = fs::read_to_string(&path)
                .with_context(|| format!("Could not open settings file {path}"))?;
            serde_json::from_str(&config).with_context(|| {
                format!("Failed to parse settings file to settings struct content:{config}")
            })?
        }
        None => Settings::default(),
    };

    let app_filter = filter::Targets::new()
        .with_target("htmx_headers", Level::DEBUG)
        .with_target("server", Level::DEBUG)
        .with_target("tower_http", Level::DEBUG)
        .with_default(Level::INFO);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(app_filter),
        )
        .init();

    let listen = settings.listen.clone();
    let state = AppState {
        settings: Arc::new(settings),
        polls: Arc::new(AtomicU32::new(0)),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/items", post(add_item))
        .route("/poll", get(poll))
        .route("/moved", get(moved))
        .route("/raw", get(raw))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG)),
        );

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Unable to listen on {listen}"))?;
    info!("Demo listening on {listen}");
    axum::serve(listener, app).await?;

    Ok(())
}
