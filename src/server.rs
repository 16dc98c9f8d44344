use crate::config::Config;
use crate::data::{DistributionRequest, LayoutRequest};
use crate::distribution;
use crate::error::ApiError;
use crate::report::{self, DistributionReport, RoomSeating, SeatingView};
use crate::seating::{self, DESKS_PER_ROW};
use crate::selection::{collect_students, select_rooms};
use axum::{
    Json, Router,
    routing::{get, post},
};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

async fn solve_handler(Json(request): Json<DistributionRequest>) -> Result<Json<Value>, ApiError> {
    solve(&request).map(Json)
}

async fn layout_handler(Json(request): Json<LayoutRequest>) -> Result<Json<Value>, ApiError> {
    let plan = seating::layout(&request.students);
    let view = SeatingView::new(&plan, request.desks_per_row.unwrap_or(DESKS_PER_ROW));
    Ok(Json(serde_json::to_value(&view)?))
}

fn validate(request: &DistributionRequest) -> Result<(), ApiError> {
    let exam = &request.exam;
    if [&exam.exam_name, &exam.exam_date, &exam.exam_time]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(ApiError::Validation(
            "exam name, date and time are required".to_string(),
        ));
    }
    if request.selected_groups.is_empty() {
        return Err(ApiError::Validation("select at least one group".to_string()));
    }
    if request.selected_rooms.is_empty() {
        return Err(ApiError::Validation("select at least one room".to_string()));
    }
    if let Some(room) = request.rooms.iter().find(|r| r.capacity == 0) {
        return Err(ApiError::Validation(format!(
            "room {:?} must have a positive capacity",
            room.id
        )));
    }
    Ok(())
}

/// Runs a full distribution: collect, select, distribute, then build the
/// reports and per-room seating plans.
pub fn solve(request: &DistributionRequest) -> Result<Value, ApiError> {
    validate(request)?;

    let students = collect_students(&request.roster, &request.selected_groups);
    let rooms = select_rooms(&request.rooms, &request.selected_rooms);
    let mut rng = match request.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };

    let assignment = distribution::distribute(students, &rooms, &mut rng)?;
    let summary = report::summarize(&assignment);
    let room_reports = report::room_reports(&assignment);
    let plans: Vec<_> = room_reports
        .iter()
        .map(|r| seating::layout(&r.students))
        .collect();
    let seating: Vec<RoomSeating<'_>> = room_reports
        .iter()
        .zip(&plans)
        .map(|(r, plan)| RoomSeating {
            room_id: &r.room.id,
            room_name: &r.room.name,
            plan: SeatingView::new(plan, DESKS_PER_ROW),
        })
        .collect();

    info!(
        "Exam {:?}: {} students in {} rooms",
        request.exam.exam_name, summary.total_students, summary.total_rooms
    );

    let report = DistributionReport {
        exam: &request.exam,
        assignment: &assignment,
        summary: &summary,
        room_reports: &room_reports,
        seating: &seating,
    };
    Ok(serde_json::to_value(&report)?)
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/v1/distribution/solve", post(solve_handler))
        .route("/v1/seating/layout", post(layout_handler))
}

pub async fn run_server(config: &Config) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await
}
