use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_table::{MatchTable, outcome_label};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::predictor::PredictorView;
use crate::ui::layout::LayoutAreas;
use plpredict_api::teams::TOP_TEAMS;

const HELP_TEXT: &str = "\
j/k or ↑/↓   move between matches
Enter/Space  show or hide the prediction for a match
h/l or ←/→   previous / next page
r            reload the current page
f            full screen
\"            toggle log pane
?            help   Esc  close help
q            quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_title_bar(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Matches => draw_matches(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(side) = layout.side {
            draw_top_teams(f, side);
        }
        draw_footer(f, layout.footer, &app.state.predictor);
        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_title_bar(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" Premier League Predictor", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("  {}", app.settings.api_url),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
            .border_type(border_type),
    )
    .style(style);
    f.render_widget(title, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.state.predictor;
    let block = default_border(Color::White).title(" Upcoming Matches ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.matches().is_empty() {
        let msg = if view.is_loading_page() {
            "Loading matches...".to_string()
        } else if let Some(err) = view.last_error() {
            format!("Could not load matches:\n{err}\n\nPress r to retry")
        } else {
            format!("No upcoming matches on page {}", view.page())
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    f.render_widget(MatchTable { rows: view.rows() }, inner);
}

fn draw_top_teams(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Top Teams ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = TOP_TEAMS.iter().map(|t| Line::from(format!(" {t}"))).collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(f: &mut Frame, area: Rect, view: &PredictorView) {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);

    let mut spans = vec![
        Span::styled("[h] prev", if view.prev_enabled() { enabled } else { disabled }),
        Span::raw(format!("  Page {}  ", view.page())),
        Span::styled("[l] next", if view.next_enabled() { enabled } else { disabled }),
    ];
    if let (Some(id), Some(prediction)) = (view.selected(), view.prediction()) {
        let tip = prediction.favourite();
        spans.push(Span::styled(
            format!("  #{id} tip: {}", outcome_label(prediction, tip)),
            Style::default().fg(Color::Green),
        ));
    }
    if let Some(at) = view.last_loaded_at() {
        spans.push(Span::styled(
            format!("  updated {at}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(err) = view.last_error() {
        spans.push(Span::styled(format!("  {err}"), Style::default().fg(Color::Red)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logger, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Left),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
