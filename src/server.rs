use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::allocation::chart::{build_chart_slices, ChartSlice};
use crate::allocation::normalize::coerce_percent_number;
use crate::allocation::{AllocationVector, Validation, TOTAL_BUDGET_POINTS};
use crate::config::Config;
use crate::error::BudgetError;
use crate::model::{BudgetModel, SimulationReport};
use crate::sector::{all_details, Sector, SectorDetails};

#[derive(Clone)]
struct ApiState {
    config: Config,
    session: Arc<Mutex<BudgetModel>>,
}

impl ApiState {
    fn new(config: Config, model: BudgetModel) -> Self {
        Self {
            config,
            session: Arc::new(Mutex::new(model)),
        }
    }

    fn session(&self) -> std::result::Result<MutexGuard<'_, BudgetModel>, ApiError> {
        self.session
            .lock()
            .map_err(|_| ApiError::internal("budget session lock poisoned"))
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<serde_json::Value>,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: error.to_string(),
            details: None,
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(error: BudgetError) -> Self {
        match error {
            BudgetError::InvalidAllocationTotal { required, actual } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: error.to_string(),
                details: Some(json!({ "required": required, "actual": actual })),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// A slider drag sends a number; the numeric text field sends whatever was typed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AllocationValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
struct SetAllocationRequest {
    value: AllocationValue,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct AllocationState {
    allocations: AllocationVector,
    total: u32,
    required: u32,
    validation: Validation,
    message: Option<String>,
}

impl AllocationState {
    fn from_model(model: &BudgetModel) -> Self {
        let validation = model.validate();
        Self {
            allocations: *model.allocations(),
            total: model.total(),
            required: TOTAL_BUDGET_POINTS,
            validation,
            message: validation.message(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChartResponse {
    slices: Vec<ChartSlice>,
}

fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/sectors", get(sectors))
        .route("/v1/allocations", get(allocations))
        .route("/v1/allocations/:sector", put(set_allocation))
        .route("/v1/validate", get(validate))
        .route("/v1/simulate", post(simulate))
        .route("/v1/reset", post(reset))
        .route("/v1/report", get(report))
        .route("/v1/chart", get(chart))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, model: BudgetModel, bind: SocketAddr) -> Result<()> {
    let app = router(ApiState::new(config, model));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("budget API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn sectors() -> Json<ApiResponse<Vec<SectorDetails>>> {
    ok(all_details())
}

async fn allocations(State(state): State<ApiState>) -> ApiResult<AllocationState> {
    let model = state.session()?;
    Ok(ok(AllocationState::from_model(&model)))
}

async fn set_allocation(
    State(state): State<ApiState>,
    Path(sector): Path<String>,
    Json(request): Json<SetAllocationRequest>,
) -> ApiResult<AllocationState> {
    let sector = parse_sector(&sector)?;
    let mut model = state.session()?;
    match request.value {
        AllocationValue::Number(value) => {
            model.set(sector, i64::from(coerce_percent_number(value)));
        }
        AllocationValue::Text(raw) => {
            model.set_raw(sector, &raw);
        }
    }
    Ok(ok(AllocationState::from_model(&model)))
}

async fn validate(State(state): State<ApiState>) -> ApiResult<AllocationState> {
    let model = state.session()?;
    Ok(ok(AllocationState::from_model(&model)))
}

async fn simulate(State(state): State<ApiState>) -> ApiResult<SimulationReport> {
    let mut model = state.session()?;
    let report = model.simulate()?.clone();
    Ok(ok(report))
}

async fn reset(State(state): State<ApiState>) -> ApiResult<AllocationState> {
    let mut model = state.session()?;
    model.reset();
    Ok(ok(AllocationState::from_model(&model)))
}

async fn report(State(state): State<ApiState>) -> ApiResult<Option<SimulationReport>> {
    let model = state.session()?;
    Ok(ok(model.last_report().cloned()))
}

async fn chart(State(state): State<ApiState>) -> ApiResult<ChartResponse> {
    let model = state.session()?;
    Ok(ok(ChartResponse {
        slices: build_chart_slices(model.allocations()),
    }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn parse_sector(raw: &str) -> std::result::Result<Sector, ApiError> {
    Sector::from_str(raw).map_err(|error| ApiError::bad_request(error.to_string()))
}
