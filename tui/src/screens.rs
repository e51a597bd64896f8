//! One view per route.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use moodlens_engine::{
    Answer, App, AssessmentResult, FormScreen, HomeEntry, LOGIN_REQUIRED_MESSAGE, MoodReading,
    MoodTone, QUESTION_COUNT, Route, Tips, WizardStep, sanitize_display_text,
};

use crate::theme::{Glyphs, Palette, spinner_frame, styles};

const NO_ASSESSMENT_DATA: &str = "No assessment data found. Please complete the assessment first.";
const NO_MOOD_DATA: &str = "No mood data available.";
const NO_IMAGE: &str = "No image captured or loaded.";
const BIRTH_DATE_PLACEHOLDER: &str = "YYYY-MM-DD";

pub(crate) fn draw_route(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let (title, lines) = match app.route() {
        Route::Home => ("MoodLens", home_lines(app, palette, glyphs)),
        Route::SelfAssessmentLanding => ("Self Assessment", landing_lines(palette)),
        Route::AssessmentStart => ("Self Assessment", start_lines(palette)),
        Route::AssessmentForm(form) => {
            let width = area.width.saturating_sub(6) as usize;
            ("Self Assessment", form_lines(app, form, width, palette, glyphs))
        }
        Route::AssessmentSummary(result) => (
            "Assessment Summary",
            summary_lines(result.as_ref(), palette, glyphs),
        ),
        Route::MoodResult(reading) => ("Your Mood", mood_lines(reading.as_ref(), palette)),
        Route::LoginRequired => ("Log In", login_lines(palette)),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(format!(" {title} "), styles::title(palette)))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::new(2, 2, 1, 1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn text(palette: &Palette) -> Style {
    Style::default().fg(palette.text_primary)
}

fn muted(palette: &Palette) -> Style {
    Style::default().fg(palette.text_secondary)
}

fn heading(content: impl Into<String>, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(
        content.into(),
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn home_lines(app: &App, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Understand Your Emotions, Embrace Your Journey", palette),
        Line::from(""),
        Line::from(Span::styled(
            "Discover your mood, express your feelings, and grow every day with MoodLens.",
            muted(palette).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    if let Some(username) = app.session().username() {
        lines.push(Line::from(Span::styled(
            format!("Welcome back, {}!", sanitize_display_text(username)),
            Style::default().fg(palette.success),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Log in through the MoodLens web app, then press r to refresh.",
            muted(palette),
        )));
    }

    lines.push(Line::from(""));
    lines.push(heading("How Can MoodLens Help You Feel Better Today", palette));
    lines.push(Line::from(""));

    let selected = app.home_selection();
    for entry in HomeEntry::ALL {
        let is_selected = entry == selected;
        let marker = if is_selected {
            glyphs.selected
        } else {
            glyphs.unselected
        };
        let title_style = if is_selected {
            styles::selected_row(palette)
        } else {
            text(palette)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} "), Style::default().fg(palette.primary)),
            Span::styled(entry.title(), title_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("     {}", entry.description()),
            muted(palette),
        )));
    }
    lines
}

fn landing_lines(palette: &Palette) -> Vec<Line<'static>> {
    vec![
        heading("Stop guessing.", palette),
        heading("Start assessing.", palette),
        Line::from(""),
        Line::from(Span::styled(
            "\"Knowing yourself is the beginning of all wisdom.\" - Aristotle",
            muted(palette).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start reflection.",
            styles::key_highlight(palette),
        )),
    ]
}

fn start_lines(palette: &Palette) -> Vec<Line<'static>> {
    vec![
        heading("How are you feeling today?", palette),
        Line::from(Span::styled(
            "Let's explore together through the following questions.",
            muted(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("You will be asked your birth date and {QUESTION_COUNT} yes/no questions."),
            muted(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to start.",
            styles::key_highlight(palette),
        )),
    ]
}

/// A text progress bar `width` cells wide.
pub(crate) fn progress_bar(progress: f64, width: usize, glyphs: &Glyphs) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = ((progress * width as f64).round() as usize).min(width);
    let mut bar = glyphs.progress_filled.repeat(filled);
    bar.push_str(&glyphs.progress_empty.repeat(width - filled));
    bar
}

fn form_lines(
    app: &App,
    form: &FormScreen,
    width: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    let wizard = form.wizard();
    match wizard.step() {
        WizardStep::AwaitingBirthDate => {
            let draft = form.birth_date_draft();
            let (shown, style) = if draft.is_empty() {
                (BIRTH_DATE_PLACEHOLDER.to_string(), muted(palette))
            } else {
                (draft.to_string(), text(palette).add_modifier(Modifier::BOLD))
            };
            vec![
                heading("When were you born?", palette),
                Line::from(Span::styled(
                    "Your age is sent with your answers.",
                    muted(palette),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Birth date: ", text(palette)),
                    Span::styled(shown, style),
                ]),
            ]
        }
        WizardStep::AwaitingAnswer | WizardStep::Submitting => {
            let index = wizard.current_question_index();
            let bar_width = width.saturating_sub(12).clamp(10, 60);
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Question {} of {QUESTION_COUNT}", index + 1),
                    muted(palette),
                )),
                Line::from(vec![
                    Span::styled(
                        progress_bar(wizard.progress(), bar_width, glyphs),
                        Style::default().fg(palette.primary),
                    ),
                    Span::styled(
                        format!(" {:>3.0}%", wizard.progress() * 100.0),
                        muted(palette),
                    ),
                ]),
                Line::from(""),
            ];
            if let Some(question) = wizard.current_question() {
                lines.push(heading(question.prompt, palette));
            }
            lines.push(Line::from(""));

            let selected = wizard.selected_answer();
            let mut choices = Vec::new();
            for answer in [Answer::Yes, Answer::No] {
                let on = selected == Some(answer);
                let (mark, style) = if on {
                    (glyphs.choice_on, styles::selected_row(palette))
                } else {
                    (glyphs.choice_off, text(palette))
                };
                choices.push(Span::styled(format!("{mark} {}", answer.as_str()), style));
                choices.push(Span::raw("    "));
            }
            lines.push(Line::from(choices));
            lines.push(Line::from(""));

            if wizard.is_submitting() {
                let spinner = spinner_frame(app.tick_count(), app.ui_options());
                lines.push(Line::from(Span::styled(
                    format!("{spinner} Submitting..."),
                    Style::default().fg(palette.primary),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::styled("Enter", styles::key_highlight(palette)),
                    Span::styled(format!(" {}", wizard.continue_label()), muted(palette)),
                ]));
            }
            lines
        }
        WizardStep::Complete(_) => vec![heading("Assessment complete.", palette)],
    }
}

fn tips_lines(tips: &Tips, palette: &Palette, glyphs: &Glyphs) -> Vec<Line<'static>> {
    let items = tips.lines();
    match tips {
        Tips::List(_) => items
            .into_iter()
            .map(|tip| {
                Line::from(Span::styled(
                    format!("{} {}", glyphs.bullet, sanitize_display_text(tip)),
                    text(palette),
                ))
            })
            .collect(),
        Tips::Text(_) => items
            .into_iter()
            .map(|tip| {
                Line::from(Span::styled(
                    sanitize_display_text(tip).into_owned(),
                    text(palette),
                ))
            })
            .collect(),
    }
}

fn summary_lines(
    result: Option<&AssessmentResult>,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    let Some(result) = result else {
        return vec![Line::from(Span::styled(
            NO_ASSESSMENT_DATA,
            Style::default().fg(palette.error),
        ))];
    };

    let mut lines = vec![
        heading(
            format!("Result: {}", sanitize_display_text(&result.label)),
            palette,
        ),
        Line::from(""),
        Line::from(Span::styled(
            sanitize_display_text(&result.description).into_owned(),
            text(palette),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Confidence: {}%", result.confidence_percent),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let tips = tips_lines(&result.tips, palette, glyphs);
    if !tips.is_empty() {
        lines.push(Line::from(""));
        lines.extend(tips);
    }
    lines
}

fn mood_lines(reading: Option<&MoodReading>, palette: &Palette) -> Vec<Line<'static>> {
    let Some(reading) = reading else {
        return vec![
            Line::from(Span::styled(
                NO_MOOD_DATA,
                Style::default()
                    .fg(palette.mood(MoodTone::Other))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(NO_IMAGE, muted(palette))),
        ];
    };

    let mood = sanitize_display_text(reading.mood.trim());
    let mood = if mood.is_empty() {
        "Unknown".to_string()
    } else {
        mood.to_uppercase()
    };
    let mut lines = vec![
        Line::from(Span::styled(
            mood,
            Style::default()
                .fg(palette.mood(reading.tone()))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(confidence) = reading.confidence_label() {
        lines.push(Line::from(vec![
            Span::styled("Confidence: ", muted(palette)),
            Span::styled(confidence, text(palette)),
        ]));
    }

    match reading.captured_image_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => lines.push(Line::from(vec![
            Span::styled("Captured image: ", muted(palette)),
            Span::styled(sanitize_display_text(url).into_owned(), text(palette)),
        ])),
        None => lines.push(Line::from(Span::styled(NO_IMAGE, muted(palette)))),
    }
    lines
}

fn login_lines(palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            LOGIN_REQUIRED_MESSAGE,
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Sign in through the MoodLens web app, then press r on the home screen.",
            muted(palette),
        )),
    ]
}
