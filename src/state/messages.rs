use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use plpredict_api::{Match, MatchId, Page, Prediction};

/// Every request carries the key its response is matched against.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkRequest {
    LoadMatches { page: Page },
    PredictMatch { match_id: MatchId },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    MatchesLoaded { page: Page, matches: Vec<Match> },
    MatchesFailed { page: Page, message: String },
    PredictionLoaded { match_id: MatchId, prediction: Prediction },
    PredictionFailed { match_id: MatchId, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
