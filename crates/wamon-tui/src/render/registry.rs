//! Instance table rendering

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use wamon_app::state::AppState;
use wamon_app::PairingPhase;
use wamon_core::Instance;

/// Render the instance table, or an empty-state hint.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Instances ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if state.registry.is_empty() {
        let hint = if state.refreshing {
            "Loading instances..."
        } else {
            "No instances. Press [n] to create one, [r] to refresh."
        };
        let empty = Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![" ", "Name", "Status", "Pairing"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = state
        .registry
        .instances()
        .iter()
        .enumerate()
        .map(|(idx, instance)| {
            let row = Row::new(vec![
                Cell::from(avatar(instance)),
                Cell::from(instance.name.clone()),
                Cell::from(status_line(instance)),
                Cell::from(pairing_line(state, &instance.name)),
            ]);
            if idx == state.registry.selected_index() {
                row.style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Min(14),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

fn avatar(instance: &Instance) -> String {
    format!("({})", instance.avatar_initial())
}

fn status_line(instance: &Instance) -> Line<'static> {
    let (color, label) = if instance.status.is_open() {
        (Color::Green, "open")
    } else {
        (Color::Red, "close")
    };
    Line::from(vec![
        Span::styled(instance.status.icon(), Style::default().fg(color)),
        Span::raw(" "),
        Span::styled(label, Style::default().fg(color)),
    ])
}

fn pairing_line(state: &AppState, name: &str) -> Line<'static> {
    let Some(view) = state.pairing_view(name) else {
        return Line::from("");
    };
    match view.phase {
        PairingPhase::Idle => Line::from(""),
        PairingPhase::Requesting => {
            Line::from(Span::styled("requesting...", Style::default().fg(Color::Yellow)))
        }
        PairingPhase::Polling => {
            let code = view.code.clone().unwrap_or_default();
            Line::from(Span::styled(
                format!("code {code}"),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
        }
        PairingPhase::Connected => {
            Line::from(Span::styled("connected", Style::default().fg(Color::Green)))
        }
        PairingPhase::Cancelled => {
            Line::from(Span::styled("cancelled", Style::default().fg(Color::DarkGray)))
        }
        PairingPhase::TimedOut => {
            Line::from(Span::styled("timed out", Style::default().fg(Color::Red)))
        }
    }
}
