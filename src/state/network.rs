use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use plpredict_api::client::PredictorApi;
use plpredict_api::{MatchId, Page};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    client: PredictorApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    /// Ticker for the request currently in flight.
    spinner: Option<JoinHandle<()>>,
}

impl NetworkWorker {
    pub fn new(
        client: PredictorApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            spinner: None,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadMatches { page } => self.handle_load_matches(page).await,
                NetworkRequest::PredictMatch { match_id } => self.handle_predict_match(match_id).await,
            };

            debug!("network request complete");
            let is_ok = !matches!(
                response,
                NetworkResponse::MatchesFailed { .. } | NetworkResponse::PredictionFailed { .. }
            );
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_matches(&self, page: Page) -> NetworkResponse {
        debug!("loading upcoming matches, page {page}");
        match self.client.fetch_future_matches(page).await {
            Ok(matches) => NetworkResponse::MatchesLoaded { page, matches },
            Err(e) => NetworkResponse::MatchesFailed { page, message: e.to_string() },
        }
    }

    async fn handle_predict_match(&self, match_id: MatchId) -> NetworkResponse {
        debug!("requesting prediction for match {match_id}");
        match self.client.predict_match(&match_id).await {
            Ok(prediction) => NetworkResponse::PredictionLoaded { match_id, prediction },
            Err(e) => NetworkResponse::PredictionFailed { match_id, message: e.to_string() },
        }
    }

    async fn start_loading_animation(&mut self) {
        self.abort_spinner().await;

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        self.spinner = Some(tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            interval.tick().await;
            loop {
                interval.tick().await;
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        }));
    }

    /// Cancel the ticker and wait for it, so no frame lands after the final state.
    async fn abort_spinner(&mut self) {
        if let Some(handle) = self.spinner.take() {
            handle.abort();
            let _ = handle.await;
        }
    }

    async fn stop_loading_animation(&mut self, is_ok: bool) {
        self.abort_spinner().await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
