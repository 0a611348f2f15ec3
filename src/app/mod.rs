//! The view state machine: owns the current view, the resource snapshot,
//! the table adapters and the confirmation gate.
//!
//! `App::handle` is the single entry point. It never blocks and never
//! talks to the daemon; anything asynchronous comes back out as a
//! [`Command`] for the event loop to dispatch.

mod event_loop;
mod input;
mod render;
mod scheduler;
mod state;

use chrono::Local;
use crossterm::event::KeyEvent;
use tracing::{debug, info, warn};

use crate::layout::{table_height, table_width};
use crate::model::{ResourceSnapshot, ViewMode};
use crate::table::{ContainerTable, ImageTable, NetworkTable, TableState, VolumeTable};

pub use event_loop::{restore_terminal, run};
pub use input::{bind, KeyAction};
pub use render::build_frame;
pub use scheduler::{fetch_snapshot, run_action, Dispatcher, RefreshScheduler};
pub use state::{ConfirmationGate, ConfirmationState, PendingAction};

/// Everything that can wake the state machine.
#[derive(Debug)]
pub enum AppEvent {
    Resize(u16, u16),
    Key(KeyEvent),
    /// The refresh interval elapsed.
    Tick,
    /// A snapshot fetch finished. `seq` orders fetches for logging only.
    Refreshed {
        seq: u64,
        result: Result<ResourceSnapshot, String>,
    },
    /// A confirmed action finished, with its status line or error text.
    ActionDone(Result<String, String>),
}

/// Work the state machine asks the event loop to perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Execute(PendingAction),
    Quit,
}

pub struct App {
    pub view: ViewMode,
    help_return: ViewMode,
    snapshot: ResourceSnapshot,
    grouped: bool,
    pub gate: ConfirmationGate,
    pub containers: ContainerTable,
    pub images: ImageTable,
    pub networks: NetworkTable,
    pub volumes: VolumeTable,
    width: u16,
    height: u16,
    ready: bool,
    status: Option<String>,
    error: Option<String>,
    logs_target: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            view: ViewMode::Containers,
            help_return: ViewMode::Containers,
            snapshot: ResourceSnapshot::default(),
            grouped: false,
            gate: ConfirmationGate::default(),
            containers: ContainerTable::default(),
            images: ImageTable::default(),
            networks: NetworkTable::default(),
            volumes: VolumeTable::default(),
            width: 0,
            height: 0,
            ready: false,
            status: None,
            error: None,
            logs_target: None,
        }
    }

    /// Apply one event. Returns the follow-up work, if any.
    pub fn handle(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Resize(width, height) => {
                self.resize(width, height);
                None
            }
            AppEvent::Key(key) => input::handle_key(self, key),
            AppEvent::Tick => Some(Command::Refresh),
            AppEvent::Refreshed { seq, result } => {
                self.apply_refresh(seq, result);
                None
            }
            AppEvent::ActionDone(Ok(message)) => {
                info!(%message, "action finished");
                self.status = Some(message);
                self.error = None;
                Some(Command::Refresh)
            }
            AppEvent::ActionDone(Err(err)) => {
                warn!(error = %err, "action failed");
                self.error = Some(err);
                self.status = None;
                None
            }
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.ready = true;

        let w = table_width(width);
        let h = table_height(height);
        for table in self.tables_mut() {
            table.resize(w, h);
        }
    }

    fn apply_refresh(&mut self, seq: u64, result: Result<ResourceSnapshot, String>) {
        match result {
            Ok(snapshot) => {
                debug!(seq, containers = snapshot.containers.len(), "snapshot applied");
                self.snapshot = snapshot;
                self.rebuild_tables();
                self.error = None;
                self.status = Some(format!("Last updated: {}", Local::now().format("%H:%M:%S")));
            }
            Err(err) => {
                warn!(seq, error = %err, "refresh failed");
                self.error = Some(err);
                self.status = None;
            }
        }
    }

    fn rebuild_tables(&mut self) {
        self.containers.update(&self.snapshot.containers, self.grouped);
        self.images.update(&self.snapshot.images);
        self.networks.update(&self.snapshot.networks);
        self.volumes.update(&self.snapshot.volumes);
    }

    fn tables_mut(&mut self) -> [&mut TableState; 4] {
        [
            &mut self.containers.state,
            &mut self.images.state,
            &mut self.networks.state,
            &mut self.volumes.state,
        ]
    }

    /// Table of the active view, if it has one.
    pub fn active_table(&self) -> Option<&TableState> {
        match self.view {
            ViewMode::Containers => Some(&self.containers.state),
            ViewMode::Images => Some(&self.images.state),
            ViewMode::Networks => Some(&self.networks.state),
            ViewMode::Volumes => Some(&self.volumes.state),
            ViewMode::Logs | ViewMode::Help => None,
        }
    }

    pub fn active_table_mut(&mut self) -> Option<&mut TableState> {
        match self.view {
            ViewMode::Containers => Some(&mut self.containers.state),
            ViewMode::Images => Some(&mut self.images.state),
            ViewMode::Networks => Some(&mut self.networks.state),
            ViewMode::Volumes => Some(&mut self.volumes.state),
            ViewMode::Logs | ViewMode::Help => None,
        }
    }

    pub fn snapshot(&self) -> &ResourceSnapshot {
        &self.snapshot
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    pub fn set_grouped(&mut self, grouped: bool) {
        self.grouped = grouped;
        self.containers.update(&self.snapshot.containers, grouped);
    }

    /// True once the terminal size is known.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_status(&mut self, message: String) {
        self.status = Some(message);
    }

    pub fn logs_target(&self) -> Option<&str> {
        self.logs_target.as_deref()
    }

    fn toggle_help(&mut self) {
        if self.view == ViewMode::Help {
            self.view = self.help_return;
        } else {
            self.help_return = self.view;
            self.view = ViewMode::Help;
        }
    }

    /// Where Esc leads from the Logs and Help views.
    fn return_view(&self) -> ViewMode {
        match self.view {
            ViewMode::Help => self.help_return,
            _ => ViewMode::Containers,
        }
    }

    fn open_logs(&mut self, container: String) {
        self.logs_target = Some(container);
        self.view = ViewMode::Logs;
        self.status = Some("Logs view not implemented yet".to_string());
    }
}
