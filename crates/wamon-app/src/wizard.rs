//! Provisioning wizard state
//!
//! Linear flow Create -> Connect -> Finish. Transitions are gated: Connect
//! requires a successful create, Finish requires the pairing poll to have
//! reported the instance as connected.

/// Current wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Create,
    Connect,
    Finish,
}

/// Which text field has focus on the Create step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardField {
    #[default]
    Name,
    Number,
}

#[derive(Debug, Default)]
pub struct WizardState {
    pub step: WizardStep,
    pub focus: WizardField,
    pub name: String,
    pub number: String,
    /// Create request in flight
    pub creating: bool,
    /// Create request succeeded
    pub created: bool,
    /// Pairing poll reported Connected
    pub connected: bool,
    pub pairing_code: Option<String>,
    pub error: Option<String>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The instance name as it will be sent to the gateway.
    pub fn instance_name(&self) -> &str {
        self.name.trim()
    }

    pub fn phone_number(&self) -> &str {
        self.number.trim()
    }

    /// Create may be submitted once: non-empty name, not already sent.
    pub fn can_submit_create(&self) -> bool {
        !self.instance_name().is_empty() && !self.creating && !self.created
    }

    /// Finish is reachable only after the poller reported Connected.
    pub fn can_finish(&self) -> bool {
        self.connected
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            WizardField::Name => WizardField::Number,
            WizardField::Number => WizardField::Name,
        };
    }

    pub fn insert_char(&mut self, c: char) {
        if self.step != WizardStep::Create || self.creating || self.created {
            return;
        }
        match self.focus {
            WizardField::Name => {
                if !c.is_control() {
                    self.name.push(c);
                }
            }
            WizardField::Number => {
                if c.is_ascii_digit() || c == '+' {
                    self.number.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.step != WizardStep::Create || self.creating || self.created {
            return;
        }
        match self.focus {
            WizardField::Name => {
                self.name.pop();
            }
            WizardField::Number => {
                self.number.pop();
            }
        }
    }
}
