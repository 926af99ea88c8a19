//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Header (title + gateway address)
    pub header: Rect,

    /// Instance table
    pub table: Rect,

    /// Status bar (notices + key hints)
    pub status: Rect,
}

/// Split the screen into header, table and status bar.
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header with borders
        Constraint::Min(3),    // Instance table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        table: chunks[1],
        status: chunks[2],
    }
}
