use crate::state::messages::NetworkRequest;
use log::{debug, error};
use plpredict_api::{Match, MatchId, PAGE_SIZE, Page, Prediction};

// ---------------------------------------------------------------------------
// Match list / predictor view
// ---------------------------------------------------------------------------

/// State behind the match table. Operations that need the network hand back
/// the request to send; responses are fed back through the `on_*` methods.
#[derive(Debug, Default)]
pub struct PredictorView {
    page: Page,
    matches: Vec<Match>,
    /// Row the keyboard cursor is on, index into `matches`.
    cursor: usize,
    selected: Option<MatchId>,
    prediction: Option<Prediction>,
    /// Page whose listing request is outstanding.
    page_in_flight: Option<Page>,
    /// Match whose prediction request is outstanding.
    prediction_in_flight: Option<MatchId>,
    last_error: Option<String>,
    last_loaded_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewRow<'a> {
    Match {
        item: &'a Match,
        selected: bool,
        under_cursor: bool,
    },
    Detail(DetailRow),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailRow {
    Loading,
    Prediction(Prediction),
}

impl PredictorView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn selected(&self) -> Option<&MatchId> {
        self.selected.as_ref()
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_loaded_at(&self) -> Option<&str> {
        self.last_loaded_at.as_deref()
    }

    pub fn busy(&self) -> bool {
        self.page_in_flight.is_some() || self.prediction_in_flight.is_some()
    }

    pub fn is_loading_page(&self) -> bool {
        self.page_in_flight.is_some()
    }

    // -----------------------------------------------------------------------
    // Pagination
    // -----------------------------------------------------------------------

    /// Ask for `page`. The shown page only changes once its rows arrive.
    pub fn load_page(&mut self, page: Page) -> NetworkRequest {
        self.page_in_flight = Some(page);
        NetworkRequest::LoadMatches { page }
    }

    pub fn reload(&mut self) -> NetworkRequest {
        self.load_page(self.page)
    }

    pub fn prev_enabled(&self) -> bool {
        !self.page.is_first()
    }

    /// A short page means the server has nothing further.
    pub fn next_enabled(&self) -> bool {
        self.matches.len() >= PAGE_SIZE as usize
    }

    pub fn prev_page(&mut self) -> Option<NetworkRequest> {
        if !self.prev_enabled() {
            return None;
        }
        Some(self.load_page(self.page.prev()))
    }

    pub fn next_page(&mut self) -> Option<NetworkRequest> {
        if !self.next_enabled() {
            return None;
        }
        Some(self.load_page(self.page.next()))
    }

    pub fn on_matches_loaded(&mut self, page: Page, matches: Vec<Match>, loaded_at: String) {
        if self.page_in_flight != Some(page) {
            debug!("dropping stale listing for page {page}");
            return;
        }
        self.page_in_flight = None;
        self.page = page;
        self.last_error = None;
        self.last_loaded_at = Some(loaded_at);
        self.matches = matches;
        self.cursor = 0;
        // The selected match belonged to the page that was just replaced.
        self.selected = None;
        self.prediction = None;
        self.prediction_in_flight = None;
    }

    pub fn on_matches_failed(&mut self, page: Page, message: String) {
        if self.page_in_flight != Some(page) {
            debug!("dropping stale listing failure for page {page}");
            return;
        }
        error!("failed to load page {page}: {message}");
        self.page_in_flight = None;
        self.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Selection and prediction
    // -----------------------------------------------------------------------

    pub fn activate(&mut self, match_id: &MatchId) -> Option<NetworkRequest> {
        if self.busy() {
            debug!("ignoring activation of {match_id} while busy");
            return None;
        }
        if self.selected.as_ref() == Some(match_id) {
            self.selected = None;
            self.prediction = None;
            return None;
        }
        self.selected = Some(match_id.clone());
        self.prediction = None;
        self.prediction_in_flight = Some(match_id.clone());
        Some(NetworkRequest::PredictMatch {
            match_id: match_id.clone(),
        })
    }

    pub fn activate_cursor(&mut self) -> Option<NetworkRequest> {
        let match_id = self.matches.get(self.cursor)?.id.clone();
        self.activate(&match_id)
    }

    pub fn on_prediction_loaded(&mut self, match_id: MatchId, prediction: Prediction) {
        if self.prediction_in_flight.as_ref() != Some(&match_id) {
            debug!("dropping stale prediction for {match_id}");
            return;
        }
        self.prediction_in_flight = None;
        if self.selected.as_ref() == Some(&match_id) {
            self.last_error = None;
            self.prediction = Some(prediction);
        }
    }

    pub fn on_prediction_failed(&mut self, match_id: MatchId, message: String) {
        if self.prediction_in_flight.as_ref() != Some(&match_id) {
            debug!("dropping stale prediction failure for {match_id}");
            return;
        }
        error!("prediction for {match_id} failed: {message}");
        self.prediction_in_flight = None;
        self.prediction = None;
        self.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Cursor
    // -----------------------------------------------------------------------

    pub fn cursor_down(&mut self) {
        let max = self.matches.len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    // -----------------------------------------------------------------------
    // Rendering model
    // -----------------------------------------------------------------------

    /// Table rows in display order. The selected match is followed by its
    /// detail row when a prediction is held or still on its way.
    pub fn rows(&self) -> Vec<ViewRow<'_>> {
        let mut rows = Vec::with_capacity(self.matches.len() + 1);
        for (idx, item) in self.matches.iter().enumerate() {
            let selected = self.selected.as_ref() == Some(&item.id);
            rows.push(ViewRow::Match {
                item,
                selected,
                under_cursor: idx == self.cursor,
            });
            if !selected {
                continue;
            }
            if self.prediction_in_flight.as_ref() == Some(&item.id) {
                rows.push(ViewRow::Detail(DetailRow::Loading));
            } else if let Some(prediction) = self.prediction {
                rows.push(ViewRow::Detail(DetailRow::Prediction(prediction)));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures(ids: impl IntoIterator<Item = u64>) -> Vec<Match> {
        ids.into_iter()
            .map(|i| Match {
                id: MatchId::Number(i),
                date: "2025-08-16".into(),
                time: "15:00".into(),
                home_team: format!("Home {i}"),
                away_team: format!("Away {i}"),
            })
            .collect()
    }

    fn loaded(ids: impl IntoIterator<Item = u64>) -> PredictorView {
        let mut view = PredictorView::new();
        view.load_page(Page::FIRST);
        view.on_matches_loaded(Page::FIRST, fixtures(ids), "12:00".into());
        view
    }

    fn sample() -> Prediction {
        Prediction { home_win: 55.0, draw: 25.0, away_win: 20.0 }
    }

    fn detail_position(view: &PredictorView) -> Option<(MatchId, DetailRow)> {
        let rows = view.rows();
        rows.iter().enumerate().find_map(|(i, row)| match row {
            ViewRow::Detail(detail) => match &rows[i - 1] {
                ViewRow::Match { item, .. } => Some((item.id.clone(), *detail)),
                ViewRow::Detail(_) => None,
            },
            ViewRow::Match { .. } => None,
        })
    }

    #[test]
    fn load_page_requests_that_page_and_marks_busy() {
        let mut view = PredictorView::new();
        let req = view.load_page(Page::new(4));
        assert_eq!(req, NetworkRequest::LoadMatches { page: Page::new(4) });
        assert!(view.busy());
        assert_eq!(view.page(), Page::FIRST);

        view.on_matches_loaded(Page::new(4), fixtures(1..=10), "12:00".into());
        assert_eq!(view.page().get(), 4);
    }

    #[test]
    fn previous_at_first_page_stays_on_first_page() {
        let mut view = loaded(1..=10);
        assert!(!view.prev_enabled());
        assert_eq!(view.prev_page(), None);
        assert_eq!(view.page(), Page::FIRST);
    }

    #[test]
    fn next_is_disabled_before_anything_arrives() {
        let view = PredictorView::new();
        assert!(!view.next_enabled());
    }

    #[test]
    fn full_page_then_short_page_toggles_next() {
        let mut view = loaded(1..=10);
        assert!(view.next_enabled());

        let req = view.next_page();
        assert_eq!(req, Some(NetworkRequest::LoadMatches { page: Page::new(2) }));
        view.on_matches_loaded(Page::new(2), fixtures(11..=13), "12:01".into());

        assert!(!view.next_enabled());
        assert!(view.prev_enabled());
        assert_eq!(view.next_page(), None);
        assert_eq!(view.page().get(), 2);
    }

    #[test]
    fn activating_a_row_selects_it_and_requests_a_prediction() {
        let mut view = loaded(1..=10);
        let req = view.activate(&MatchId::Number(7));
        assert_eq!(
            req,
            Some(NetworkRequest::PredictMatch { match_id: MatchId::Number(7) })
        );
        assert_eq!(view.selected(), Some(&MatchId::Number(7)));
        assert!(view.busy());
        assert_eq!(
            detail_position(&view),
            Some((MatchId::Number(7), DetailRow::Loading))
        );
    }

    #[test]
    fn activating_the_selected_row_again_clears_without_request() {
        let mut view = loaded(1..=10);
        view.activate(&MatchId::Number(7));
        view.on_prediction_loaded(MatchId::Number(7), sample());

        assert_eq!(view.activate(&MatchId::Number(7)), None);
        assert_eq!(view.selected(), None);
        assert_eq!(view.prediction(), None);
        assert_eq!(detail_position(&view), None);
    }

    #[test]
    fn activation_while_busy_is_ignored() {
        let mut view = loaded(1..=10);
        view.activate(&MatchId::Number(7));

        assert_eq!(view.activate(&MatchId::Number(9)), None);
        assert_eq!(view.activate(&MatchId::Number(7)), None);
        assert_eq!(view.selected(), Some(&MatchId::Number(7)));

        let mut view = PredictorView::new();
        view.load_page(Page::FIRST);
        assert_eq!(view.activate(&MatchId::Number(1)), None);
        assert_eq!(view.selected(), None);
    }

    #[test]
    fn detail_row_follows_the_selected_match() {
        let mut view = loaded(1..=10);
        view.activate(&MatchId::Number(7));
        view.on_prediction_loaded(MatchId::Number(7), sample());
        assert_eq!(
            detail_position(&view),
            Some((MatchId::Number(7), DetailRow::Prediction(sample())))
        );

        let other = Prediction { home_win: 30.0, draw: 30.0, away_win: 40.0 };
        assert!(view.activate(&MatchId::Number(9)).is_some());
        view.on_prediction_loaded(MatchId::Number(9), other);
        assert_eq!(
            detail_position(&view),
            Some((MatchId::Number(9), DetailRow::Prediction(other)))
        );
        let detail_rows = view
            .rows()
            .iter()
            .filter(|r| matches!(r, ViewRow::Detail(_)))
            .count();
        assert_eq!(detail_rows, 1);
    }

    #[test]
    fn failed_prediction_keeps_selection_without_detail() {
        let mut view = loaded(1..=10);
        view.activate(&MatchId::Number(3));
        view.on_prediction_failed(MatchId::Number(3), "boom".into());

        assert_eq!(view.selected(), Some(&MatchId::Number(3)));
        assert_eq!(view.prediction(), None);
        assert!(!view.busy());
        assert_eq!(detail_position(&view), None);
        assert_eq!(view.last_error(), Some("boom"));
    }

    #[test]
    fn failed_page_keeps_previous_rows() {
        let mut view = loaded(1..=10);
        view.next_page();
        view.on_matches_failed(Page::new(2), "timeout".into());

        assert!(!view.busy());
        assert_eq!(view.matches().len(), 10);
        assert_eq!(view.last_error(), Some("timeout"));
        assert_eq!(view.page(), Page::FIRST);
        assert!(!view.prev_enabled());

        // Page 2 was never shown, so next asks for it again.
        assert_eq!(
            view.next_page(),
            Some(NetworkRequest::LoadMatches { page: Page::new(2) })
        );
        assert_eq!(view.reload(), NetworkRequest::LoadMatches { page: Page::FIRST });
    }

    #[test]
    fn stale_page_response_is_dropped() {
        let mut view = loaded(1..=10);
        view.next_page();
        view.reload();
        view.on_matches_loaded(Page::new(2), fixtures(11..=13), "12:02".into());

        assert_eq!(view.matches().len(), 10);
        assert_eq!(view.page(), Page::FIRST);
        assert!(view.busy());

        view.on_matches_loaded(Page::FIRST, fixtures(1..=10), "12:03".into());
        assert!(!view.busy());
    }

    #[test]
    fn new_page_discards_selection_and_pending_prediction() {
        let mut view = loaded(1..=10);
        view.activate(&MatchId::Number(2));
        view.next_page();
        view.on_matches_loaded(Page::new(2), fixtures(11..=20), "12:04".into());

        assert_eq!(view.selected(), None);
        assert!(!view.busy());

        view.on_prediction_loaded(MatchId::Number(2), sample());
        assert_eq!(view.prediction(), None);
    }

    #[test]
    fn cursor_stays_within_rows_and_activates_its_match() {
        let mut view = loaded(1..=3);
        view.cursor_up();
        assert_eq!(view.cursor, 0);
        for _ in 0..5 {
            view.cursor_down();
        }
        assert_eq!(view.cursor, 2);

        let req = view.activate_cursor();
        assert_eq!(
            req,
            Some(NetworkRequest::PredictMatch { match_id: MatchId::Number(3) })
        );
    }

    #[test]
    fn activate_cursor_on_empty_list_does_nothing() {
        let mut view = loaded(std::iter::empty::<u64>());
        assert_eq!(view.activate_cursor(), None);
        assert!(view.rows().is_empty());
    }
}
