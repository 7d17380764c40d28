use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use chrono::NaiveDateTime;
use log::{debug, info};
use serde::Deserialize;
use tokio::{net::TcpListener, signal};
use tower_http::services::ServeDir;

use calendar_widget::{
    bootstrap, AllDayEvent, EventTemplates, ScriptHost, StyleBuildConfig, TimedEvent,
    WidgetConfig, CONTAINER_ID,
};

use crate::page;

const JAVASCRIPT: &str = "application/javascript; charset=utf-8";
const JSON: &str = "application/json";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Everything served is rendered once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState(Arc<Rendered>);

struct Rendered {
    page: String,
    script: String,
    config_json: String,
    style_module: String,
    templates: EventTemplates,
}

impl AppState {
    pub fn init(
        config: &WidgetConfig,
        style: &StyleBuildConfig,
        stylesheet: Option<&str>,
    ) -> anyhow::Result<Self> {
        style
            .validate()
            .context("invalid style build configuration")?;

        let page = page::render(stylesheet);
        let host = ScriptHost::new(page.element_ids);
        let script = bootstrap(&host, CONTAINER_ID, config)
            .context("failed to bootstrap calendar widget")?;

        Ok(Self(Arc::new(Rendered {
            page: page.html,
            script: script.into_string(),
            config_json: config.to_json()?,
            style_module: style.to_module()?,
            templates: config.template.clone(),
        })))
    }
}

pub fn router(state: AppState, assets: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/", get(handle_page))
        .route("/calendar.js", get(handle_script))
        .route("/config.json", get(handle_config))
        .route("/tailwind.config.js", get(handle_style))
        .route("/preview", get(handle_preview))
        .route("/health", get(|| async { StatusCode::OK }));

    if let Some(dir) = assets {
        router = router.nest_service("/assets", ServeDir::new(dir));
    }

    router
        .fallback(|| async { Redirect::permanent("/") })
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub async fn serve(address: SocketAddr, assets: Option<&Path>) -> anyhow::Result<()> {
    let stylesheet = assets.map(|_| page::STYLESHEET_PATH);
    let state = AppState::init(
        &WidgetConfig::default(),
        &StyleBuildConfig::default(),
        stylesheet,
    )?;

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind listener to {address}"))?;
    info!("Listening at http://{address}");

    axum::serve(listener, router(state, assets))
        .with_graceful_shutdown(shutdown())
        .await
        .context("error while serving calendar")
}

async fn shutdown() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    debug!("{method} {uri} -> {}", response.status());
    response
}

async fn handle_page(State(state): State<AppState>) -> Html<String> {
    Html(state.0.page.clone())
}

async fn handle_script(State(state): State<AppState>) -> Response {
    ([(header::CONTENT_TYPE, JAVASCRIPT)], state.0.script.clone()).into_response()
}

async fn handle_config(State(state): State<AppState>) -> Response {
    ([(header::CONTENT_TYPE, JSON)], state.0.config_json.clone()).into_response()
}

async fn handle_style(State(state): State<AppState>) -> Response {
    ([(header::CONTENT_TYPE, JAVASCRIPT)], state.0.style_module.clone()).into_response()
}

#[derive(Deserialize)]
struct PreviewQuery {
    title: String,
    start: Option<String>,
    end: Option<String>,
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Renders an event through the same templates the widget uses. Events
/// without a time range render with the all-day template. The markup is
/// returned as plain text since titles are not escaped.
async fn handle_preview(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Response {
    let templates = &state.0.templates;

    let markup = match (query.start, query.end) {
        (None, None) => templates.allday(&AllDayEvent { title: query.title }),
        (Some(start), Some(end)) => {
            let (Some(start), Some(end)) = (parse_timestamp(&start), parse_timestamp(&end)) else {
                return (
                    StatusCode::BAD_REQUEST,
                    "`start` and `end` must be timestamps like 2024-09-02T09:00",
                )
                    .into_response();
            };
            templates.time(&TimedEvent {
                start,
                end,
                title: query.title,
            })
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                "`start` and `end` must be given together",
            )
                .into_response()
        }
    };

    ([(header::CONTENT_TYPE, PLAIN_TEXT)], markup).into_response()
}
