use crate::teams::normalize_team_name;
use crate::wire::{FutureMatchRecord, PredictRequest, PredictResponse};
use crate::{Match, MatchId, PAGE_SIZE, Page, Prediction};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5050";

const FUTURE_MATCHES_PATH: &str = "/api/future-matches";
const PREDICT_MATCH_PATH: &str = "/api/predict-match";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the match listing and prediction endpoints.
#[derive(Debug, Clone)]
pub struct PredictorApi {
    client: Client,
    base_url: String,
}

impl Default for PredictorApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) | ApiError::Parsing(e, _) => Some(e),
        }
    }
}

impl PredictorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        Self {
            client: Client::builder()
                .user_agent(concat!("plpredict/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of upcoming matches. Always asks for `PAGE_SIZE` rows;
    /// a shorter reply means there is nothing after this page.
    pub async fn fetch_future_matches(&self, page: Page) -> ApiResult<Vec<Match>> {
        let url = future_matches_url(&self.base_url, page);
        let records: Vec<FutureMatchRecord> = self.get(&url).await?;
        Ok(records.into_iter().map(map_record).collect())
    }

    /// Ask the backend for the win/draw/loss split of a single match.
    pub async fn predict_match(&self, match_id: &MatchId) -> ApiResult<Prediction> {
        let url = format!("{}{PREDICT_MATCH_PATH}", self.base_url);
        let raw: PredictResponse = self.post(&url, &PredictRequest { match_id }).await?;
        Ok(map_prediction(raw))
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        decode(response, url).await
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> ApiResult<T> {
        let response = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;
        decode(response, url).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> ApiResult<T> {
    let response = response
        .error_for_status()
        .map_err(|e| ApiError::Api(e, url.to_owned()))?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parsing(e, url.to_owned()))
}

fn future_matches_url(base_url: &str, page: Page) -> String {
    format!(
        "{base_url}{FUTURE_MATCHES_PATH}?page={}&page_size={PAGE_SIZE}",
        page.get()
    )
}

// ---------------------------------------------------------------------------
// Mapping: wire types to domain types
// ---------------------------------------------------------------------------

fn map_record(record: FutureMatchRecord) -> Match {
    let home_team = normalize_team_name(&record.team).into_owned();
    let away_team = normalize_team_name(&record.opponent).into_owned();
    // Rows without an id still need a stable key for selection.
    let id = record
        .id
        .unwrap_or_else(|| MatchId::Text(format!("{}-{home_team}-{away_team}", record.date)));

    Match {
        id,
        date: record.date,
        time: record.time,
        home_team,
        away_team,
    }
}

fn map_prediction(raw: PredictResponse) -> Prediction {
    Prediction {
        home_win: raw.home_win_prob,
        draw: raw.draw_prob,
        away_win: raw.away_win_prob,
    }
}
