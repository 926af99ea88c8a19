//! Provisioning wizard dialog

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use wamon_app::state::AppState;
use wamon_app::{WizardField, WizardStep};

use super::centered_rect;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let modal = centered_rect(56, 14, area);
    frame.render_widget(Clear, modal);

    let title = match state.wizard.step {
        WizardStep::Create => " New Instance (1/3) ",
        WizardStep::Connect => " Pair Device (2/3) ",
        WizardStep::Finish => " Done (3/3) ",
    };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    match state.wizard.step {
        WizardStep::Create => render_create(frame, inner, state),
        WizardStep::Connect => render_connect(frame, inner, state),
        WizardStep::Finish => render_finish(frame, inner),
    }
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(
            format!("{marker}{label}: "),
            if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
        Span::raw(format!("{value}{cursor}")),
    ])
}

fn render_create(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // spacer
        Constraint::Length(1), // name field
        Constraint::Length(1), // number field
        Constraint::Length(1), // spacer
        Constraint::Length(1), // error / progress
        Constraint::Min(0),
        Constraint::Length(1), // hints
    ])
    .split(area);

    let wizard = &state.wizard;
    frame.render_widget(
        Paragraph::new(field_line(
            "Name  ",
            &wizard.name,
            wizard.focus == WizardField::Name,
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "Number",
            &wizard.number,
            wizard.focus == WizardField::Number,
        )),
        chunks[2],
    );

    if wizard.creating {
        frame.render_widget(
            Paragraph::new("Creating instance...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
            chunks[4],
        );
    } else if let Some(error) = &wizard.error {
        frame.render_widget(
            Paragraph::new(error.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red)),
            chunks[4],
        );
    }

    frame.render_widget(hints("[Enter] Create  [Tab] Field  [Esc] Cancel"), chunks[6]);
}

fn render_connect(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1), // prompt
        Constraint::Length(1),
        Constraint::Length(1), // code
        Constraint::Length(1),
        Constraint::Length(1), // progress / error
        Constraint::Min(0),
        Constraint::Length(1), // hints
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new("Enter this code in WhatsApp on the instance's phone:")
            .alignment(Alignment::Center),
        chunks[1],
    );

    match &state.wizard.pairing_code {
        Some(code) => frame.render_widget(
            Paragraph::new(code.as_str())
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            chunks[3],
        ),
        None => frame.render_widget(
            Paragraph::new("Requesting pairing code...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow)),
            chunks[3],
        ),
    }

    match &state.wizard.error {
        Some(error) => frame.render_widget(
            Paragraph::new(error.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red)),
            chunks[5],
        ),
        None => frame.render_widget(
            Paragraph::new("Waiting for the device to connect...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            chunks[5],
        ),
    }

    frame.render_widget(hints("[Esc] Cancel"), chunks[7]);
}

fn render_finish(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new("Instance connected")
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        chunks[1],
    );
    frame.render_widget(hints("[Enter] Done"), chunks[3]);
}

fn hints(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
}
