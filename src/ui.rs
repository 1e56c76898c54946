//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! The layout is a two-row split: the APOD panel on top and a one-line
//! status bar at the bottom.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Panel};
use crate::render::{TITLE_PLACEHOLDER, UNAVAILABLE_MESSAGE};
use crate::source::{ApodRecord, MediaType};

/// Draw the complete UI for one frame.
pub fn draw(app: &App, frame: &mut Frame) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    draw_panel(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn draw_panel(app: &App, frame: &mut Frame, area: Rect) {
    let lines = match &app.panel {
        Panel::Loading => vec![Line::from(Span::styled("Loading NASA APOD…", muted()))],
        Panel::Loaded { record, .. } => record_lines(record),
        Panel::Unavailable => vec![Line::from(Span::styled(
            UNAVAILABLE_MESSAGE,
            muted().add_modifier(Modifier::ITALIC),
        ))],
    };

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Astronomy Picture of the Day ")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));

    frame.render_widget(panel, area);
}

/// Lines for a loaded record: heading, byline, media link, explanation.
fn record_lines(record: &ApodRecord) -> Vec<Line<'_>> {
    let title = record.title.as_deref().unwrap_or(TITLE_PLACEHOLDER);
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];

    let mut byline = Vec::new();
    if let Some(date) = record.published() {
        byline.push(date.format("%Y-%m-%d").to_string());
    }
    if let Some(copyright) = record.copyright.as_deref() {
        byline.push(format!("© {}", copyright.trim()));
    }
    if !byline.is_empty() {
        lines.push(Line::from(Span::styled(byline.join("  "), muted())));
    }

    let media_label = match record.media() {
        MediaType::Image => Some("Image"),
        MediaType::Video => Some("Video"),
        MediaType::Other => None,
    };
    if let (Some(label), Some(url)) = (media_label, record.url.as_deref()) {
        lines.push(Line::from(vec![
            Span::styled(format!("{label}: "), muted()),
            Span::styled(url, Style::default().fg(Color::Cyan)),
        ]));
    }

    if let Some(explanation) = record.explanation.as_deref() {
        lines.push(Line::raw(""));
        lines.push(Line::raw(explanation));
    }

    lines
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  q: quit  ↑/↓: scroll  Home: top"),
    ]));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Acquisition;
    use crate::source::SourceKind;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();

        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    #[test]
    fn draws_loading_state() {
        let app = App::new();
        assert!(screen_text(&app).contains("Loading NASA APOD"));
    }

    #[test]
    fn draws_loaded_record() {
        let mut app = App::new();
        app.apply(Acquisition::Success {
            record: ApodRecord {
                title: Some("Horsehead Nebula".into()),
                explanation: Some("Dark dust against glowing gas.".into()),
                media_type: Some(MediaType::Image),
                url: Some("https://apod.nasa.gov/h.jpg".into()),
                date: Some("2025-01-02".into()),
                ..Default::default()
            },
            source: SourceKind::LocalProxy,
        });

        let text = screen_text(&app);
        assert!(text.contains("Horsehead Nebula"));
        assert!(text.contains("2025-01-02"));
        assert!(text.contains("Image: https://apod.nasa.gov/h.jpg"));
        assert!(text.contains("Dark dust"));
        assert!(text.contains("via local proxy"));
    }

    #[test]
    fn draws_placeholder_when_unavailable() {
        let mut app = App::new();
        app.apply(Acquisition::Exhausted { cause: None });

        let text = screen_text(&app);
        assert!(text.contains(UNAVAILABLE_MESSAGE));
    }

    #[test]
    fn draw_does_not_panic_when_scrolled_past_end() {
        let mut app = App::new();
        app.apply(Acquisition::Success {
            record: ApodRecord::default(),
            source: SourceKind::DemoKey,
        });
        for _ in 0..100 {
            app.scroll_down();
        }
        screen_text(&app);
    }
}
