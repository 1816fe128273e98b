use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::metrics::{format_duration, format_pace, format_speed};
use crate::run::Run;
use crate::{App, AppState, FormField};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const FIELD_WIDTH: usize = 16;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Tracker => render_tracker(self, area, buf),
            AppState::AddRun => render_form(self, area, buf),
            AppState::ConfirmDelete => render_confirm(self, area, buf),
        }
    }
}

/// Pure presenter for one tracker row: distance, duration, pace, speed.
pub fn run_cells(run: &Run) -> [String; 4] {
    [
        format!("{} km", run.distance),
        format_duration(run.time),
        format_pace(run.distance, run.time),
        format_speed(run.distance, run.time),
    ]
}

fn render_tracker(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = match app.sort {
        Some(criterion) => format!("My runs · sorted by {} pace", criterion),
        None => String::from("My runs"),
    };
    Paragraph::new(Span::styled(title, bold_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    if app.runs.is_empty() {
        Paragraph::new(vec![
            Line::from("No runs yet."),
            Line::from("Press 'a' to add your first."),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
    } else {
        let header = Row::new(vec!["Distance", "Time", "Pace (/km)", "Speed (km/h)"])
            .style(dim_style.patch(bold_style));
        let rows = app.runs.iter().enumerate().map(|(idx, run)| {
            let row = Row::new(
                run_cells(run)
                    .into_iter()
                    .map(Cell::from)
                    .collect::<Vec<_>>(),
            );
            if idx == app.selected {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        });

        Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[1], buf);
    }

    if let Some(alert) = &app.alert {
        Paragraph::new(Span::styled(
            alert.clone(),
            Style::default().fg(Color::Red).patch(bold_style),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        "a add · d delete · b best · w worst · ↑/↓ select · q quit",
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}

fn render_form(app: &App, area: Rect, buf: &mut Buffer) {
    let band = centered_band(area, 6);

    let footer = match &app.form.error {
        Some(error) => Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "Enter save · Tab switch field · Esc cancel",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };

    let lines = vec![
        Line::from(Span::styled(
            "Add run",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line(
            "Distance (km)",
            &app.form.distance,
            app.form.focus == FormField::Distance,
        ),
        field_line(
            "Time (seconds)",
            &app.form.time,
            app.form.focus == FormField::Time,
        ),
        Line::from(""),
        footer,
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(band, buf);
}

fn render_confirm(app: &App, area: Rect, buf: &mut Buffer) {
    let band = centered_band(area, 4);

    let summary = app
        .selected_run()
        .map(|run| {
            let [distance, time, pace, speed] = run_cells(run);
            format!("{} · {} · {} /km · {} km/h", distance, time, pace, speed)
        })
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            "Delete this run?",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(summary),
        Line::from(""),
        Line::from(Span::styled(
            "y delete · n keep",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(band, buf);
}

/// Vertically centered band of `height` rows with the standard margins.
fn centered_band(area: Rect, height: u16) -> Rect {
    let top = area.height.saturating_sub(height) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(top),
                Constraint::Length(height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);
    chunks[1]
}

/// One labelled input; the entry area is underlined out to a fixed width
/// and the focused field carries a cursor mark.
fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let entry_style = if focused {
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().add_modifier(Modifier::DIM | Modifier::UNDERLINED)
    };

    let cursor = if focused { "▏" } else { "" };
    let pad = FIELD_WIDTH.saturating_sub(value.width() + cursor.width());

    Line::from(vec![
        Span::raw(format!("{}: ", label)),
        Span::styled(
            format!("{}{}{}", value, cursor, " ".repeat(pad)),
            entry_style,
        ),
    ])
}
