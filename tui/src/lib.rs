//! TUI rendering for MoodLens using ratatui.

mod input;
mod screens;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use moodlens_engine::{App, RouteKind, StatusKind, WizardStep, sanitize_display_text};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),    // Screen
            Constraint::Length(1), // Key hints
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    screens::draw_route(frame, app, chunks[0], &palette, &glyphs);
    draw_key_hints(frame, app, chunks[1], &palette);
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);
}

fn key_hints(app: &App) -> &'static [(&'static str, &'static str)] {
    match app.route_kind() {
        RouteKind::Home => &[
            ("j/k", "select"),
            ("Enter", "open"),
            ("r", "refresh session"),
            ("q", "quit"),
        ],
        RouteKind::SelfAssessmentLanding => &[("Enter", "start reflection"), ("Esc", "home")],
        RouteKind::AssessmentStart => &[("Enter", "start"), ("Esc", "home")],
        RouteKind::AssessmentForm => {
            let step = app.form().map(|form| form.wizard().step());
            match step {
                Some(WizardStep::AwaitingBirthDate) => &[
                    ("0-9 -", "type date"),
                    ("Backspace", "delete"),
                    ("Enter", "continue"),
                    ("Esc", "home"),
                ],
                Some(WizardStep::AwaitingAnswer) => &[
                    ("y/n", "answer"),
                    ("Enter", "continue"),
                    ("Esc", "home"),
                ],
                Some(WizardStep::Submitting | WizardStep::Complete(_)) | None => {
                    &[("Esc", "home")]
                }
            }
        }
        RouteKind::AssessmentSummary | RouteKind::MoodResult | RouteKind::LoginRequired => {
            &[("Enter/Esc", "home")]
        }
    }
}

fn draw_key_hints(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut spans = vec![Span::raw(" ")];
    for (idx, (key, label)) in key_hints(app).iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", styles::key_hint(palette)));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {label}"), styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub(crate) fn draw_status_bar(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (status_text, status_style) = if let Some(status) = app.status_message() {
        let text = sanitize_display_text(&status.text);
        match status.kind {
            StatusKind::Error => (format!("{} {text}", glyphs.error), styles::error(palette)),
            StatusKind::Info => (
                text.into_owned(),
                Style::default().fg(palette.text_secondary),
            ),
        }
    } else if app.is_submitting() {
        let spinner = spinner_frame(app.tick_count(), app.ui_options());
        (
            format!("{spinner} Submitting your answers..."),
            Style::default().fg(palette.primary),
        )
    } else if let Some(username) = app.session().username() {
        (
            format!(
                "{} Signed in as {}",
                glyphs.signed_in,
                sanitize_display_text(username)
            ),
            Style::default().fg(palette.success),
        )
    } else {
        (
            format!("{} Not signed in", glyphs.signed_out),
            Style::default().fg(palette.text_muted),
        )
    };

    // Build status line
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(status_text, status_style),
    ]));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests;
