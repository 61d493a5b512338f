use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::Local;
use plpredict_api::Page;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Matches,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_network_response(&mut self, response: NetworkResponse) {
        let view = &mut self.state.predictor;
        match response {
            NetworkResponse::LoadingStateChanged { .. } => {}
            NetworkResponse::MatchesLoaded { page, matches } => {
                let loaded_at = Local::now().format("%H:%M").to_string();
                view.on_matches_loaded(page, matches, loaded_at);
            }
            NetworkResponse::MatchesFailed { page, message } => view.on_matches_failed(page, message),
            NetworkResponse::PredictionLoaded { match_id, prediction } => {
                view.on_prediction_loaded(match_id, prediction)
            }
            NetworkResponse::PredictionFailed { match_id, message } => {
                view.on_prediction_failed(match_id, message)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Match list, delegated to PredictorView
    // -----------------------------------------------------------------------

    pub fn load_first_page(&mut self) -> NetworkRequest {
        self.state.predictor.load_page(Page::FIRST)
    }

    pub fn reload_page(&mut self) -> NetworkRequest {
        self.state.predictor.reload()
    }

    pub fn next_page(&mut self) -> Option<NetworkRequest> {
        self.state.predictor.next_page()
    }

    pub fn prev_page(&mut self) -> Option<NetworkRequest> {
        self.state.predictor.prev_page()
    }

    pub fn cursor_down(&mut self) {
        self.state.predictor.cursor_down();
    }

    pub fn cursor_up(&mut self) {
        self.state.predictor.cursor_up();
    }

    /// Toggle the row under the cursor. Returns the prediction request to send
    /// when the row became selected.
    pub fn activate_row(&mut self) -> Option<NetworkRequest> {
        self.state.predictor.activate_cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plpredict_api::{Match, MatchId, Prediction};

    fn fixtures(n: u64) -> Vec<Match> {
        (1..=n)
            .map(|i| Match {
                id: MatchId::Number(i),
                date: "2025-08-16".into(),
                time: "15:00".into(),
                home_team: "Arsenal".into(),
                away_team: "Chelsea".into(),
            })
            .collect()
    }

    #[test]
    fn responses_flow_into_the_view() {
        let mut app = App::new(AppSettings::default());
        assert_eq!(app.load_first_page(), NetworkRequest::LoadMatches { page: Page::FIRST });

        app.on_network_response(NetworkResponse::MatchesLoaded {
            page: Page::FIRST,
            matches: fixtures(10),
        });
        assert_eq!(app.state.predictor.matches().len(), 10);
        assert!(app.state.predictor.last_loaded_at().is_some());

        app.cursor_down();
        let req = app.activate_row();
        assert_eq!(req, Some(NetworkRequest::PredictMatch { match_id: MatchId::Number(2) }));

        let prediction = Prediction { home_win: 55.0, draw: 25.0, away_win: 20.0 };
        app.on_network_response(NetworkResponse::PredictionLoaded {
            match_id: MatchId::Number(2),
            prediction,
        });
        assert_eq!(app.state.predictor.prediction(), Some(&prediction));
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = App::new(AppSettings::default());
        app.update_tab(MenuItem::Help);
        assert_eq!(app.state.active_tab, MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Matches);
    }
}
