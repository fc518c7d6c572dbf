use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{access::ProfileRules, api::state::AppState, domain::ProfileType, error::Result};

/// The full rule set, one entry per profile, for the admin back office.
pub async fn rules(State(state): State<AppState>) -> Json<Vec<ProfileRules>> {
    let matrix = &state.service_context.access_matrix;
    let rules = ProfileType::ALL
        .into_iter()
        .map(|p| matrix.profile_rules(p))
        .collect();

    Json(rules)
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub responder: ProfileType,
    pub target: ProfileType,
}

pub async fn check(
    State(state): State<AppState>,
    Query(params): Query<CheckQuery>,
) -> Result<Json<Value>> {
    let matrix = &state.service_context.access_matrix;

    Ok(Json(json!({
        "can_respond": matrix.can_respond(params.responder, params.target),
        "can_see_announcements": matrix.can_see_announcements(params.responder, params.target),
        "is_symmetric": matrix.is_symmetric(params.responder, params.target),
    })))
}
