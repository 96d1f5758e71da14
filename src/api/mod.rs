use axum::{
    Router,
    extract::{Json, Query, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Deserializer, Serialize, de::IntoDeserializer};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    ChartConfig, ChartData, CurrencyFormatter, DanishKrone, DisplayMode, HORIZON_YEARS,
    INFLATION_RATE, MONTHLY_CONTRIBUTION, build_chart,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliDisplayMode {
    Nominal,
    InflationAdjusted,
}

impl From<CliDisplayMode> for DisplayMode {
    fn from(value: CliDisplayMode) -> Self {
        match value {
            CliDisplayMode::Nominal => DisplayMode::Nominal,
            CliDisplayMode::InflationAdjusted => DisplayMode::InflationAdjusted,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiDisplayMode {
    #[serde(alias = "nominal-value")]
    Nominal,
    #[serde(
        alias = "inflationAdjusted",
        alias = "inflation_adjusted",
        alias = "real",
        alias = "todays-power"
    )]
    InflationAdjusted,
}

impl From<ApiDisplayMode> for DisplayMode {
    fn from(value: ApiDisplayMode) -> Self {
        match value {
            ApiDisplayMode::Nominal => DisplayMode::Nominal,
            ApiDisplayMode::InflationAdjusted => DisplayMode::InflationAdjusted,
        }
    }
}

impl From<DisplayMode> for ApiDisplayMode {
    fn from(value: DisplayMode) -> Self {
        match value {
            DisplayMode::Nominal => ApiDisplayMode::Nominal,
            DisplayMode::InflationAdjusted => ApiDisplayMode::InflationAdjusted,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "investment-graph",
    about = "Compound growth vs. inflation: 5,000 DKK/month over 20 years at 0%, 7%, 20% and 30%"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the chart page and its JSON payload over HTTP
    Serve {
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print the chart payload to stdout
    Render {
        #[arg(
            long,
            value_enum,
            default_value_t = CliDisplayMode::InflationAdjusted,
            help = "Show nominal values or values in today's purchasing power"
        )]
        mode: CliDisplayMode,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ChartQuery {
    #[serde(deserialize_with = "blank_mode_as_default")]
    mode: Option<ApiDisplayMode>,
}

// `?mode=` arrives as an empty string and means "no preference".
fn blank_mode_as_default<'de, D>(deserializer: D) -> Result<Option<ApiDisplayMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            ApiDisplayMode::deserialize(IntoDeserializer::<D::Error>::into_deserializer(value))
                .map(Some)
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioAssumptions {
    horizon_years: u32,
    monthly_contribution: f64,
    inflation_rate: f64,
    currency: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartResponse {
    mode: ApiDisplayMode,
    assumptions: ScenarioAssumptions,
    chart: ChartData,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/chart", get(chart_handler))
        .route("/api/health", get(health_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(host: IpAddr, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "investment graph listening");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

/// Renders the chart for `mode` the way the `render` subcommand prints it.
pub fn render_chart(mode: DisplayMode, format: OutputFormat) -> Result<String, String> {
    let response = build_chart_response(mode);
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)
            .map_err(|e| format!("failed to serialize chart: {e}")),
        OutputFormat::Table => Ok(chart_table(&response.chart, &DanishKrone)),
    }
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn chart_handler(query: Result<Query<ChartQuery>, QueryRejection>) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    };
    let mode = mode_from_query(query);
    debug!(?mode, "building chart");
    json_response(StatusCode::OK, build_chart_response(mode))
}

fn mode_from_query(query: ChartQuery) -> DisplayMode {
    query
        .mode
        .map(DisplayMode::from)
        .unwrap_or(DisplayMode::InflationAdjusted)
}

fn build_chart_response(mode: DisplayMode) -> ChartResponse {
    let config = ChartConfig::new(mode);
    ChartResponse {
        mode: mode.into(),
        assumptions: ScenarioAssumptions {
            horizon_years: HORIZON_YEARS,
            monthly_contribution: MONTHLY_CONTRIBUTION,
            inflation_rate: INFLATION_RATE,
            currency: "DKK",
        },
        chart: build_chart(&config, &DanishKrone),
    }
}

fn chart_table(chart: &ChartData, formatter: &dyn CurrencyFormatter) -> String {
    let header: String = chart
        .datasets
        .iter()
        .map(|dataset| format!(" {:>16}", dataset.key))
        .collect();
    let mut lines = vec![format!("{:>6}{header}", "Year")];

    for (row, year) in chart.labels.iter().enumerate() {
        let cells: String = chart
            .datasets
            .iter()
            .map(|dataset| {
                let value = dataset.data.get(row).copied().unwrap_or(f64::NAN);
                format!(" {:>16}", formatter.decimal(value))
            })
            .collect();
        lines.push(format!("{year:>6}{cells}"));
    }

    lines.push(String::new());
    lines.extend(chart.cards.iter().map(|card| {
        format!(
            "{}: {} (today's value {})",
            card.title, card.nominal_text, card.todays_power_text
        )
    }));
    lines.push(chart.annotation.text.clone());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn chart_query_from_json(json: &str) -> Result<ChartQuery, String> {
    serde_json::from_str::<ChartQuery>(json).map_err(|e| format!("Invalid chart query: {e}"))
}
