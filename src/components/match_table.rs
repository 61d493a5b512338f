use crate::state::predictor::{DetailRow, ViewRow};
use plpredict_api::{Match, Outcome, Prediction};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

// ---------------------------------------------------------------------------
// Column widths
// ---------------------------------------------------------------------------

const DATE_W: usize = 10;
const TIME_W: usize = 5;
/// Cap on each team column so wide terminals don't spread the table out.
const TEAM_W_MAX: usize = 24;
const TEAM_W_MIN: usize = 8;

/// Matches table: header line, one line per match, and a detail line under
/// the selected match.
pub struct MatchTable<'a> {
    pub rows: Vec<ViewRow<'a>>,
}

impl Widget for MatchTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let team_w = team_width(area.width);
        let visible = area.height.saturating_sub(1) as usize;
        let offset = scroll_offset(&self.rows, visible);

        let mut lines = Vec::with_capacity(visible + 1);
        lines.push(Line::from(Span::styled(
            header_line(team_w),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )));
        for row in self.rows.iter().skip(offset).take(visible) {
            lines.push(match row {
                ViewRow::Match { item, selected, under_cursor } => {
                    match_line(item, *selected, *under_cursor, team_w)
                }
                ViewRow::Detail(detail) => detail_line(detail),
            });
        }

        Paragraph::new(lines).render(area, buf);
    }
}

fn team_width(width: u16) -> usize {
    // marker + date + time + gaps
    let fixed = 2 + DATE_W + 2 + TIME_W + 2 + 2;
    ((width as usize).saturating_sub(fixed) / 2).clamp(TEAM_W_MIN, TEAM_W_MAX)
}

/// First row to draw so the cursor row (and the detail under it) stay visible.
fn scroll_offset(rows: &[ViewRow<'_>], visible: usize) -> usize {
    let Some(cursor) = rows
        .iter()
        .position(|r| matches!(r, ViewRow::Match { under_cursor: true, .. }))
    else {
        return 0;
    };
    let last_needed = match rows.get(cursor + 1) {
        Some(ViewRow::Detail(_)) => cursor + 1,
        _ => cursor,
    };
    (last_needed + 1).saturating_sub(visible.max(1))
}

fn header_line(team_w: usize) -> String {
    format!(
        "  {:<DATE_W$}  {:<TIME_W$}  {:<team_w$}  {}",
        "Date", "Time", "Home", "Away"
    )
}

/// Date and time cells; kickoff formatting when it parses, raw strings otherwise.
pub fn kickoff_cells(item: &Match) -> (String, String) {
    match item.kickoff() {
        Some(kickoff) => (
            kickoff.format("%a %d %b").to_string(),
            kickoff.format("%H:%M").to_string(),
        ),
        None => (item.date.clone(), item.time.clone()),
    }
}

fn match_line(item: &Match, selected: bool, under_cursor: bool, team_w: usize) -> Line<'static> {
    let marker = if under_cursor { ">" } else { " " };
    let (date, time) = kickoff_cells(item);
    let text = format!(
        "{marker} {:<DATE_W$}  {:<TIME_W$}  {:<team_w$}  {}",
        date,
        time,
        truncate_name(&item.home_team, team_w),
        truncate_name(&item.away_team, team_w),
    );
    let style = if selected {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else if under_cursor {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(text, style))
}

fn detail_line(detail: &DetailRow) -> Line<'static> {
    let indent = Span::raw(format!("  {:<DATE_W$}  ", "└"));
    match detail {
        DetailRow::Loading => Line::from(vec![
            indent,
            Span::styled("Predicting…", Style::default().fg(Color::DarkGray)),
        ]),
        DetailRow::Prediction(prediction) => {
            let favourite = prediction.favourite();
            let mut spans = vec![indent];
            for outcome in [Outcome::Home, Outcome::Draw, Outcome::Away] {
                let style = if outcome == favourite {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                spans.push(Span::styled(outcome_label(prediction, outcome), style));
                spans.push(Span::raw("  "));
            }
            Line::from(spans)
        }
    }
}

pub fn outcome_label(prediction: &Prediction, outcome: Outcome) -> String {
    format!("{} {:.1}%", outcome.label(), prediction.probability(outcome))
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::predictor::PredictorView;
    use plpredict_api::{MatchId, Page};

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

    fn loaded_view() -> PredictorView {
        let mut view = PredictorView::new();
        view.load_page(Page::FIRST);
        view.on_matches_loaded(Page::FIRST, fixtures(1..=10), "12:00".into());
        view
    }

    fn render(view: &PredictorView, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        MatchTable { rows: view.rows() }.render(area, &mut buf);
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    fn line_index(lines: &[String], needle: &str) -> usize {
        lines
            .iter()
            .position(|l| l.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not found in {lines:#?}"))
    }

    #[test]
    fn rows_show_date_time_and_both_teams() {
        let lines = render(&loaded_view(), 80, 12);
        assert!(lines[0].contains("Date") && lines[0].contains("Away"));
        assert!(lines[1].starts_with("> Sat 16 Aug  15:00"), "{:?}", lines[1]);
        assert!(lines[1].contains("Home 1") && lines[1].contains("Away 1"));
    }

    #[test]
    fn prediction_renders_under_its_row_and_moves_with_selection() {
        let mut view = loaded_view();
        view.activate(&MatchId::Number(7));
        view.on_prediction_loaded(
            MatchId::Number(7),
            Prediction { home_win: 55.0, draw: 25.0, away_win: 20.0 },
        );

        let lines = render(&view, 80, 14);
        let row7 = line_index(&lines, "Home 7 ");
        assert!(lines[row7 + 1].contains("Home 55.0%"), "{lines:#?}");
        assert!(lines[row7 + 1].contains("Draw 25.0%"));
        assert!(lines[row7 + 1].contains("Away 20.0%"));

        view.activate(&MatchId::Number(9));
        view.on_prediction_loaded(
            MatchId::Number(9),
            Prediction { home_win: 10.0, draw: 30.0, away_win: 60.0 },
        );
        let lines = render(&view, 80, 14);
        let row7 = line_index(&lines, "Home 7 ");
        let row9 = line_index(&lines, "Home 9 ");
        assert!(lines[row7 + 1].contains("Home 8 "));
        assert!(lines[row9 + 1].contains("Away 60.0%"));
        assert_eq!(lines.iter().filter(|l| l.contains('%')).count(), 1);
    }

    #[test]
    fn pending_prediction_shows_loading_indicator() {
        let mut view = loaded_view();
        view.activate(&MatchId::Number(2));
        let lines = render(&view, 80, 14);
        let row2 = line_index(&lines, "Home 2 ");
        assert!(lines[row2 + 1].contains("Predicting…"));
    }

    #[test]
    fn unparsable_kickoff_falls_back_to_raw_strings() {
        let mut item = fixtures([1]).remove(0);
        item.date = "TBC".into();
        assert_eq!(kickoff_cells(&item), ("TBC".to_string(), "15:00".to_string()));
    }

    #[test]
    fn cursor_row_is_kept_on_screen() {
        let mut view = loaded_view();
        for _ in 0..9 {
            view.cursor_down();
        }
        let lines = render(&view, 80, 5);
        assert!(lines[4].starts_with(">"), "{lines:#?}");
        assert!(lines[4].contains("Home 10"));
    }

    #[test]
    fn long_team_names_are_truncated() {
        assert_eq!(truncate_name("Wolverhampton", 6), "Wolve…");
        assert_eq!(truncate_name("Wolves", 6), "Wolves");
    }
}
