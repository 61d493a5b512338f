/// Raw wire types for the prediction backend.
/// These map to the clean domain types in client.rs.
use crate::MatchId;
use serde::{Deserialize, Serialize};

/// One row of `GET /api/future-matches`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FutureMatchRecord {
    pub id: Option<MatchId>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub opponent: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest<'a> {
    pub match_id: &'a MatchId,
}

/// Body of `POST /api/predict-match`.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct PredictResponse {
    pub home_win_prob: f64,
    pub draw_prob: f64,
    pub away_win_prob: f64,
}
