use crate::app::MenuItem;
use crate::state::predictor::PredictorView;

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub predictor: PredictorView,
    pub show_logs: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
