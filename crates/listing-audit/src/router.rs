use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::config::ChartConfig;
use crate::error::AppError;
use crate::flow::{standard_diagram, FlowCanvas, FlowDiagram};
use crate::legality::{classify, CategoryCounts, ClassificationSummary};
use crate::listings::{Listing, ListingDataset};
use crate::map::{MapColorRule, MapLayer, MapPoint};
use crate::story::{StoryFrame, StoryPlayer, StoryStep};

/// Read-only state shared by every handler. The dataset is classified once
/// when the state is built.
#[derive(Debug, Clone)]
pub struct AuditState {
    dataset: Arc<ListingDataset>,
    counts: CategoryCounts,
    chart: ChartConfig,
    snapshot_date: NaiveDate,
}

impl AuditState {
    pub fn new(dataset: Arc<ListingDataset>, chart: ChartConfig, snapshot_date: NaiveDate) -> Self {
        let counts = classify(dataset.listings()).counts();
        info!(
            listings = counts.all,
            illegal = counts.illegal,
            "listing dataset classified"
        );

        Self {
            dataset,
            counts,
            chart,
            snapshot_date,
        }
    }

    pub fn dataset(&self) -> &ListingDataset {
        &self.dataset
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    pub fn chart(&self) -> ChartConfig {
        self.chart
    }

    pub fn snapshot_date(&self) -> NaiveDate {
        self.snapshot_date
    }

    pub fn story(&self) -> StoryPlayer {
        StoryPlayer::new(self.counts, self.snapshot_date)
    }
}

/// Optional canvas overrides for a single sankey request.
#[derive(Debug, Default, Deserialize)]
pub struct CanvasQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl CanvasQuery {
    fn canvas(&self, chart: ChartConfig) -> FlowCanvas {
        let base = chart.canvas();
        FlowCanvas {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            ..base
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapResponse {
    pub layer: MapLayer,
    pub points: Vec<MapPoint>,
}

/// Router builder exposing the classification, sankey, story and map views.
pub fn audit_router(state: Arc<AuditState>) -> Router {
    Router::new()
        .route("/api/v1/listings/classification", get(classification_handler))
        .route(
            "/api/v1/listings/sankey",
            get(sankey_handler).post(adhoc_sankey_handler),
        )
        .route("/api/v1/listings/story/:step", get(story_handler))
        .route("/api/v1/listings/map", get(map_handler))
        .with_state(state)
}

pub(crate) async fn classification_handler(
    State(state): State<Arc<AuditState>>,
) -> Json<ClassificationSummary> {
    Json(state.counts.summary())
}

pub(crate) async fn sankey_handler(
    State(state): State<Arc<AuditState>>,
    Query(query): Query<CanvasQuery>,
) -> Result<Json<FlowDiagram>, AppError> {
    let diagram = standard_diagram(&state.counts, query.canvas(state.chart))?;
    Ok(Json(diagram))
}

pub(crate) async fn adhoc_sankey_handler(
    State(state): State<Arc<AuditState>>,
    Query(query): Query<CanvasQuery>,
    Json(listings): Json<Vec<Listing>>,
) -> Result<Json<FlowDiagram>, AppError> {
    let counts = classify(&listings).counts();
    let diagram = standard_diagram(&counts, query.canvas(state.chart))?;
    Ok(Json(diagram))
}

pub(crate) async fn story_handler(
    State(state): State<Arc<AuditState>>,
    Path(step): Path<u32>,
) -> Json<StoryFrame> {
    Json(state.story().frame(StoryStep::from_index(step)))
}

pub(crate) async fn map_handler(
    State(state): State<Arc<AuditState>>,
    Query(query): Query<MapQuery>,
) -> Response {
    let rule = match query.color.as_deref() {
        None => MapColorRule::default(),
        Some(name) => match MapColorRule::from_name(name) {
            Some(rule) => rule,
            None => {
                let payload = json!({
                    "error": format!("unknown map colour rule '{name}'"),
                    "expected": MapColorRule::ordered().map(MapColorRule::label),
                });
                return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
            }
        },
    };

    let layer = MapLayer::new(format!("Listings by {}", rule.label()), rule);
    let points = layer.points(state.dataset.listings());
    (StatusCode::OK, Json(MapResponse { layer, points })).into_response()
}
