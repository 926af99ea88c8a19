//! Main render/view function (View in TEA pattern)

mod confirm;
mod registry;
mod wizard;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use wamon_app::state::{AppState, NoticeLevel, UiMode};

use crate::layout;

/// Render the complete UI (View function in TEA)
pub fn view(frame: &mut Frame, state: &AppState) {
    let areas = layout::create(frame.area());

    render_header(frame, areas.header, state);
    registry::render(frame, areas.table, state);
    render_status_bar(frame, areas.status, state);

    // Modal overlays
    match state.ui_mode {
        UiMode::Registry => {}
        UiMode::Wizard => wizard::render(frame, frame.area(), state),
        UiMode::ConfirmQuit => confirm::render(frame, frame.area()),
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(vec![
        Span::styled(
            " wamon ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("gateway {}", state.settings.gateway.base_url),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(if state.refreshing { "  refreshing..." } else { "" }),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    // Latest notice wins over key hints
    let line = match state.latest_notice() {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                format!(" {}", notice.text),
                Style::default().fg(color),
            ))
        }
        None => Line::from(Span::styled(
            " [n] New  [c] Connect  [x] Stop pairing  [l] Logout  [d] Delete  [r] Refresh  [q] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}

/// Calculate a centered modal rect, clamped to the available area.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use wamon_app::state::AppState;
    use wamon_app::{InputKey, Message, PairingEvent};
    use wamon_core::{ConnectionStatus, Instance};

    fn render_to_string(state: &AppState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| view(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    fn drive(state: &mut AppState, message: Message) {
        let mut msg = Some(message);
        while let Some(m) = msg {
            msg = wamon_app::update(state, m).message;
        }
    }

    #[test]
    fn test_empty_registry_shows_hint() {
        let state = AppState::default();
        let content = render_to_string(&state);
        assert!(content.contains("No instances"));
        assert!(content.contains("wamon"));
    }

    #[test]
    fn test_instances_render_with_status() {
        let mut state = AppState::default();
        drive(
            &mut state,
            Message::InstancesLoaded {
                instances: vec![
                    Instance::new("shop1", ConnectionStatus::Open),
                    Instance::new("shop2", ConnectionStatus::Close),
                ],
            },
        );

        let content = render_to_string(&state);
        assert!(content.contains("shop1"));
        assert!(content.contains("shop2"));
        assert!(content.contains("open"));
        assert!(content.contains("close"));
    }

    #[test]
    fn test_wizard_connect_step_shows_code() {
        let mut state = AppState::default();
        drive(&mut state, Message::Key(InputKey::Char('n')));
        for c in "shop1".chars() {
            drive(&mut state, Message::Key(InputKey::Char(c)));
        }
        drive(&mut state, Message::Key(InputKey::Enter));
        drive(
            &mut state,
            Message::InstanceCreated {
                name: "shop1".to_string(),
            },
        );
        drive(
            &mut state,
            Message::Pairing(PairingEvent::CodeReady {
                name: "shop1".to_string(),
                code: "ABC123".to_string(),
            }),
        );

        let content = render_to_string(&state);
        assert!(content.contains("Pair Device"));
        assert!(content.contains("ABC123"));
    }

    #[test]
    fn test_confirm_quit_dialog_renders() {
        let mut state = AppState::default();
        drive(
            &mut state,
            Message::Pairing(PairingEvent::CodeReady {
                name: "shop1".to_string(),
                code: "ABC123".to_string(),
            }),
        );
        drive(&mut state, Message::RequestQuit);

        let content = render_to_string(&state);
        assert!(content.contains("Quit?"));
        assert!(content.contains("pairing poll"));
    }

    #[test]
    fn test_notice_replaces_key_hints() {
        let mut state = AppState::default();
        let hints = render_to_string(&state);
        assert!(hints.contains("[q] Quit"));

        state.notice_error("Gateway unreachable");
        let content = render_to_string(&state);
        assert!(content.contains("Gateway unreachable"));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 8);
        let modal = centered_rect(50, 10, area);
        assert_eq!(modal.width, 30);
        assert_eq!(modal.height, 8);
    }
}
