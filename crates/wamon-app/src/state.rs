//! Application state (TEA pattern)

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Local};

use crate::config::Settings;
use crate::pairing::PairingPhase;
use crate::registry::InstanceRegistry;
use crate::wizard::WizardState;

/// How long a notice stays visible in the status bar.
pub const NOTICE_TTL_SECS: i64 = 6;

const MAX_NOTICES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Which surface owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Registry,
    Wizard,
    ConfirmQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient status-bar message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub at: DateTime<Local>,
}

/// What the UI knows about an instance's pairing, fed by poll events.
#[derive(Debug, Clone)]
pub struct PairingView {
    pub phase: PairingPhase,
    pub code: Option<String>,
}

#[derive(Default)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub registry: InstanceRegistry,
    pub wizard: WizardState,
    pub pairing: HashMap<String, PairingView>,
    pub notices: VecDeque<Notice>,
    /// A fetch is in flight
    pub refreshing: bool,
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    // ─────────────────────────────────────────────────────────
    // Quit lifecycle
    // ─────────────────────────────────────────────────────────

    /// Quit directly unless a pairing poll is still running, in which case
    /// ask for confirmation first.
    pub fn request_quit(&mut self) {
        if self.any_pairing_active() {
            self.ui_mode = UiMode::ConfirmQuit;
        } else {
            self.phase = AppPhase::Quitting;
        }
    }

    pub fn confirm_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn cancel_quit(&mut self) {
        if self.ui_mode == UiMode::ConfirmQuit {
            self.ui_mode = UiMode::Registry;
        }
    }

    // ─────────────────────────────────────────────────────────
    // Wizard
    // ─────────────────────────────────────────────────────────

    pub fn open_wizard(&mut self) {
        self.wizard.reset();
        self.ui_mode = UiMode::Wizard;
    }

    pub fn close_wizard(&mut self) {
        self.wizard.reset();
        self.ui_mode = UiMode::Registry;
    }

    /// True when the wizard is open and working on `name`.
    pub fn wizard_owns(&self, name: &str) -> bool {
        self.ui_mode == UiMode::Wizard && self.wizard.instance_name() == name
    }

    // ─────────────────────────────────────────────────────────
    // Pairing views
    // ─────────────────────────────────────────────────────────

    pub fn set_pairing_phase(&mut self, name: &str, phase: PairingPhase) {
        self.pairing
            .entry(name.to_string())
            .and_modify(|view| view.phase = phase)
            .or_insert(PairingView { phase, code: None });
    }

    pub fn set_pairing_code(&mut self, name: &str, code: String) {
        self.pairing
            .entry(name.to_string())
            .and_modify(|view| view.code = Some(code.clone()))
            .or_insert(PairingView {
                phase: PairingPhase::Polling,
                code: Some(code),
            });
    }

    pub fn pairing_view(&self, name: &str) -> Option<&PairingView> {
        self.pairing.get(name)
    }

    pub fn pairing_active(&self, name: &str) -> bool {
        self.pairing
            .get(name)
            .is_some_and(|view| view.phase.is_active())
    }

    pub fn any_pairing_active(&self) -> bool {
        self.pairing.values().any(|view| view.phase.is_active())
    }

    // ─────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────

    pub fn notice_info(&mut self, text: impl Into<String>) {
        self.push_notice(NoticeLevel::Info, text.into());
    }

    pub fn notice_error(&mut self, text: impl Into<String>) {
        self.push_notice(NoticeLevel::Error, text.into());
    }

    fn push_notice(&mut self, level: NoticeLevel, text: String) {
        self.notices.push_back(Notice {
            level,
            text,
            at: Local::now(),
        });
        while self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }

    /// Drop notices past their display window. Called on Tick.
    pub fn prune_notices(&mut self) {
        let cutoff = Local::now() - chrono::Duration::seconds(NOTICE_TTL_SECS);
        while self
            .notices
            .front()
            .is_some_and(|notice| notice.at < cutoff)
        {
            self.notices.pop_front();
        }
    }
}
