use serde::{Deserialize, Serialize};

use crate::model::short_id;

/// A destructive or state-changing operation awaiting confirmation.
///
/// Carries only the data needed to execute it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAction {
    RemoveContainer { id: String },
    RemoveImage { id: String },
    RemoveNetwork { id: String, name: String },
    RemoveVolume { name: String },
    StopContainer { id: String },
    StopGroup { project: String, services: Vec<String> },
    StartGroup { project: String, services: Vec<String> },
    DeleteGroup { project: String },
}

impl PendingAction {
    /// Status line shown once the action completed.
    pub fn success_message(&self) -> String {
        match self {
            PendingAction::RemoveContainer { id } => format!("Container {} deleted", short_id(id)),
            PendingAction::RemoveImage { id } => {
                format!("Image {} deleted", short_id(id.strip_prefix("sha256:").unwrap_or(id)))
            }
            PendingAction::RemoveNetwork { name, .. } => format!("Network {} deleted", name),
            PendingAction::RemoveVolume { name } => format!("Volume {} deleted", name),
            PendingAction::StopContainer { id } => format!("Container {} stopped", short_id(id)),
            PendingAction::StopGroup { project, .. } => format!("Compose stack '{}' stopped", project),
            PendingAction::StartGroup { project, .. } => format!("Compose stack '{}' started", project),
            PendingAction::DeleteGroup { project } => format!("Compose stack '{}' deleted", project),
        }
    }

    /// Short verb for logs.
    pub fn verb(&self) -> &'static str {
        match self {
            PendingAction::RemoveContainer { .. } => "remove-container",
            PendingAction::RemoveImage { .. } => "remove-image",
            PendingAction::RemoveNetwork { .. } => "remove-network",
            PendingAction::RemoveVolume { .. } => "remove-volume",
            PendingAction::StopContainer { .. } => "stop-container",
            PendingAction::StopGroup { .. } => "stop-group",
            PendingAction::StartGroup { .. } => "start-group",
            PendingAction::DeleteGroup { .. } => "delete-group",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfirmationState {
    #[default]
    Idle,
    AwaitingConfirmation {
        message: String,
        action: PendingAction,
    },
}

/// Two-state modal gate in front of every pending action.
///
/// An armed action is consumed exactly once: by `confirm` (returned for
/// execution) or by `cancel` (dropped).
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    state: ConfirmationState,
}

impl ConfirmationGate {
    /// Arm the gate. Refused for an empty message or while already armed.
    pub fn arm(&mut self, message: String, action: PendingAction) -> bool {
        if message.is_empty() || self.is_armed() {
            return false;
        }
        self.state = ConfirmationState::AwaitingConfirmation { message, action };
        true
    }

    /// Take the armed action for execution and return to idle.
    pub fn confirm(&mut self) -> Option<PendingAction> {
        match std::mem::take(&mut self.state) {
            ConfirmationState::AwaitingConfirmation { action, .. } => Some(action),
            ConfirmationState::Idle => None,
        }
    }

    /// Discard the armed action and return to idle.
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.confirm()
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, ConfirmationState::AwaitingConfirmation { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match &self.state {
            ConfirmationState::AwaitingConfirmation { message, .. } => Some(message),
            ConfirmationState::Idle => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.state {
            ConfirmationState::AwaitingConfirmation { action, .. } => Some(action),
            ConfirmationState::Idle => None,
        }
    }
}
