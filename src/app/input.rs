use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::model::{short_id, ViewMode};

use super::state::PendingAction;
use super::{App, Command};

/// Rows moved by PageUp/PageDown when the viewport is not yet known.
const PAGE_FALLBACK: usize = 10;

/// What a key press means, independent of the active view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Refresh,
    NextView,
    JumpTo(ViewMode),
    ToggleHelp,
    Back,
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Delete,
    Stop,
    ToggleGrouping,
    StopGroup,
    StartGroup,
    DeleteGroup,
    Logs,
}

/// The fixed key binding table.
pub fn bind(key: &KeyEvent) -> Option<KeyAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('r') if ctrl => KeyAction::Refresh,
        KeyCode::Char('s') if ctrl => KeyAction::Stop,
        _ if ctrl => return None,
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('?') => KeyAction::ToggleHelp,
        KeyCode::Char('d') | KeyCode::Delete => KeyAction::Delete,
        KeyCode::Char('g') => KeyAction::ToggleGrouping,
        KeyCode::Char('s') => KeyAction::StopGroup,
        KeyCode::Char('S') => KeyAction::StartGroup,
        KeyCode::Char('D') => KeyAction::DeleteGroup,
        KeyCode::Char('L') => KeyAction::Logs,
        KeyCode::Char('k') | KeyCode::Up => KeyAction::Up,
        KeyCode::Char('j') | KeyCode::Down => KeyAction::Down,
        KeyCode::Char(c) => KeyAction::JumpTo(ViewMode::from_digit(c)?),
        KeyCode::Tab => KeyAction::NextView,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        KeyCode::Home => KeyAction::Top,
        KeyCode::End => KeyAction::Bottom,
        KeyCode::Esc => KeyAction::Back,
        _ => return None,
    };
    Some(action)
}

/// Handle a key event. While a confirmation is armed only y/n/Esc do
/// anything; every other key is swallowed.
pub fn handle_key(app: &mut App, key_event: KeyEvent) -> Option<Command> {
    if app.gate.is_armed() {
        return handle_confirmation(app, key_event.code);
    }

    let action = bind(&key_event)?;
    let before = app.view;
    match action {
        KeyAction::Quit => return Some(Command::Quit),
        KeyAction::Refresh => return Some(Command::Refresh),
        KeyAction::NextView => app.view = app.view.next(),
        KeyAction::JumpTo(view) => app.view = view,
        KeyAction::ToggleHelp => app.toggle_help(),
        KeyAction::Back => {
            if matches!(app.view, ViewMode::Logs | ViewMode::Help) {
                app.view = app.return_view();
            }
        }
        KeyAction::Up => move_cursor(app, |t| t.move_up(1)),
        KeyAction::Down => move_cursor(app, |t| t.move_down(1)),
        KeyAction::PageUp => move_cursor(app, |t| t.move_up(page(t.height))),
        KeyAction::PageDown => move_cursor(app, |t| t.move_down(page(t.height))),
        KeyAction::Top => move_cursor(app, |t| t.go_top()),
        KeyAction::Bottom => move_cursor(app, |t| t.go_bottom()),
        KeyAction::Delete => arm_delete(app),
        KeyAction::Stop => arm_stop_container(app),
        KeyAction::ToggleGrouping => {
            if app.view == ViewMode::Containers {
                app.set_grouped(!app.is_grouped());
            }
        }
        KeyAction::StopGroup | KeyAction::StartGroup | KeyAction::DeleteGroup => {
            arm_group_action(app, action)
        }
        KeyAction::Logs => open_logs(app),
    }
    if app.view != before {
        debug!(from = ?before, to = ?app.view, "view switched");
    }
    None
}

fn handle_confirmation(app: &mut App, code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let action = app.gate.confirm()?;
            debug!(action = action.verb(), "confirmed");
            Some(Command::Execute(action))
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            if let Some(action) = app.gate.cancel() {
                debug!(action = action.verb(), "cancelled");
            }
            None
        }
        _ => None,
    }
}

fn page(height: usize) -> usize {
    if height == 0 { PAGE_FALLBACK } else { height }
}

fn move_cursor(app: &mut App, f: impl FnOnce(&mut crate::table::TableState) -> bool) {
    if let Some(table) = app.active_table_mut() {
        f(table);
    }
}

fn arm(app: &mut App, message: String, action: PendingAction) {
    let verb = action.verb();
    if app.gate.arm(message, action) {
        debug!(action = verb, "confirmation armed");
    } else {
        debug!(action = verb, "confirmation not armed");
    }
}

fn arm_delete(app: &mut App) {
    let snapshot = app.snapshot();
    let request = match app.view {
        ViewMode::Containers => app.containers.selected_container(&snapshot.containers).map(|c| {
            (
                format!("Are you sure you want to delete container '{}'?", c.short_id()),
                PendingAction::RemoveContainer { id: c.id.clone() },
            )
        }),
        ViewMode::Images => app.images.selected(&snapshot.images).map(|img| {
            (
                format!("Are you sure you want to delete image '{}'?", img.primary_tag()),
                PendingAction::RemoveImage { id: img.id.clone() },
            )
        }),
        ViewMode::Networks => app.networks.selected(&snapshot.networks).map(|net| {
            (
                format!("Are you sure you want to delete network '{}'?", net.name),
                PendingAction::RemoveNetwork {
                    id: net.id.clone(),
                    name: net.name.clone(),
                },
            )
        }),
        ViewMode::Volumes => app.volumes.selected(&snapshot.volumes).map(|vol| {
            (
                format!("Are you sure you want to delete volume '{}'?", vol.name),
                PendingAction::RemoveVolume { name: vol.name.clone() },
            )
        }),
        ViewMode::Logs | ViewMode::Help => None,
    };

    match request {
        Some((message, action)) => arm(app, message, action),
        None => debug!(view = ?app.view, "delete ignored: nothing selected"),
    }
}

fn arm_stop_container(app: &mut App) {
    if app.view != ViewMode::Containers {
        return;
    }
    let snapshot = app.snapshot();
    let Some(c) = app.containers.selected_container(&snapshot.containers) else {
        debug!("stop ignored: nothing selected");
        return;
    };

    if c.is_stopped() {
        let message = format!("Container {} is already stopped", short_id(&c.id));
        app.set_status(message);
        return;
    }

    let message = format!("Are you sure you want to stop container '{}'?", c.short_id());
    let action = PendingAction::StopContainer { id: c.id.clone() };
    arm(app, message, action);
}

fn arm_group_action(app: &mut App, action: KeyAction) {
    if app.view != ViewMode::Containers || !app.is_grouped() {
        return;
    }
    // Only compose-project groups can be driven through the compose CLI.
    let Some(group) = app.containers.selected_group() else {
        debug!("group action ignored: nothing selected");
        return;
    };
    let Some(project) = group.project().map(str::to_string) else {
        debug!(group = %group.name, "group action ignored: not a compose project");
        return;
    };
    let services = group.services();

    let (message, pending) = match action {
        KeyAction::StopGroup => (
            format!("Are you sure you want to stop compose stack '{}'?", project),
            PendingAction::StopGroup { project, services },
        ),
        KeyAction::StartGroup => (
            format!("Are you sure you want to start compose stack '{}'?", project),
            PendingAction::StartGroup { project, services },
        ),
        _ => (
            format!(
                "Are you sure you want to delete the entire compose stack '{}'? \
                 This will remove all containers, networks, volumes, and images.",
                project
            ),
            PendingAction::DeleteGroup { project },
        ),
    };
    arm(app, message, pending);
}

fn open_logs(app: &mut App) {
    if app.view != ViewMode::Containers {
        return;
    }
    let snapshot = app.snapshot();
    let Some(name) = app
        .containers
        .selected_container(&snapshot.containers)
        .map(|c| c.primary_name().to_string())
    else {
        return;
    };
    app.open_logs(name);
}
