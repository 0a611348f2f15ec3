use crate::model::ViewMode;
use crate::table::TableState;
use crate::view::{
    Body, Dialog, Footer, Frame, Header, StatusLine, Tab, TableView, HELP_SECTIONS,
};

use super::App;

pub const TITLE: &str = "Docker Status";
pub const CONFIRM_HINT: &str = "Press 'y' to confirm, 'n' to cancel";

const CONTAINER_LEGEND: &[&str] = &[
    "1-4: switch views",
    "↑/↓: navigate",
    "r: refresh",
    "g: group toggle",
    "ctrl+s: stop",
    "d: delete",
    "L: logs",
    "q: quit",
];
const GROUPED_LEGEND: &[&str] = &[
    "[grouped by compose]",
    "s: stop group",
    "S: start group",
    "D: delete group",
];
const RESOURCE_LEGEND: &[&str] = &["1-4: switch views", "↑/↓: navigate", "r: refresh", "d: delete", "q: quit"];
const LOGS_LEGEND: &[&str] = &["esc: back", "q: quit"];
const HELP_LEGEND: &[&str] = &["?/esc: close help", "q: quit"];

/// Project the app state into a render tree. Pure: no I/O, no clock.
pub fn build_frame(app: &App) -> Frame {
    Frame {
        header: header(app),
        body: body(app),
        footer: footer(app),
    }
}

fn header(app: &App) -> Header {
    let snapshot = app.snapshot();
    let tabs = ViewMode::TABS
        .iter()
        .map(|&view| {
            let count = match view {
                ViewMode::Containers => snapshot.containers.len(),
                ViewMode::Images => snapshot.images.len(),
                ViewMode::Networks => snapshot.networks.len(),
                ViewMode::Volumes => snapshot.volumes.len(),
                ViewMode::Logs | ViewMode::Help => 0,
            };
            Tab {
                label: format!("{} ({})", view.title(), count),
                active: view == app.view,
            }
        })
        .collect();

    Header {
        title: format!("{} v{}", TITLE, env!("CARGO_PKG_VERSION")),
        tabs,
    }
}

fn body(app: &App) -> Body {
    if let Some(message) = app.gate.message() {
        return Body::Confirmation(Dialog {
            message: message.to_string(),
            hint: CONFIRM_HINT,
        });
    }
    if !app.is_ready() {
        return Body::Loading;
    }

    match app.view {
        ViewMode::Help => Body::Help(HELP_SECTIONS),
        ViewMode::Logs => Body::Logs {
            container: app.logs_target().map(str::to_string),
        },
        _ => match app.active_table() {
            Some(table) => Body::Table(table_view(table, empty_message(app.view))),
            None => Body::Loading,
        },
    }
}

fn table_view(table: &TableState, empty_message: &'static str) -> TableView {
    let mut selected = None;
    let rows = table
        .visible_rows()
        .enumerate()
        .map(|(i, (index, row))| {
            if index == table.cursor {
                selected = Some(i);
            }
            row.clone()
        })
        .collect();

    TableView {
        columns: table.columns.clone(),
        rows,
        selected,
        total_rows: table.rows.len(),
        empty_message,
    }
}

fn empty_message(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Containers => "No containers found",
        ViewMode::Images => "No images found",
        ViewMode::Networks => "No networks found",
        ViewMode::Volumes => "No volumes found",
        ViewMode::Logs | ViewMode::Help => "",
    }
}

fn footer(app: &App) -> Footer {
    let legend = match app.view {
        ViewMode::Containers if app.is_grouped() => {
            CONTAINER_LEGEND.iter().chain(GROUPED_LEGEND).copied().collect()
        }
        ViewMode::Containers => CONTAINER_LEGEND.to_vec(),
        ViewMode::Images | ViewMode::Networks | ViewMode::Volumes => RESOURCE_LEGEND.to_vec(),
        ViewMode::Logs => LOGS_LEGEND.to_vec(),
        ViewMode::Help => HELP_LEGEND.to_vec(),
    };

    let status = match (app.error(), app.status()) {
        (Some(err), _) => StatusLine::Error(err.to_string()),
        (None, Some(msg)) => StatusLine::Info(msg.to_string()),
        (None, None) => StatusLine::Empty,
    };

    Footer { legend, status }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::app::AppEvent;
    use crate::model::{ContainerInfo, ResourceSnapshot};

    fn press(app: &mut App, c: char) {
        app.handle(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }

    fn app_with(n: usize) -> App {
        let mut app = App::new();
        app.handle(AppEvent::Resize(100, 30));
        let containers = (0..n)
            .map(|i| ContainerInfo {
                id: format!("{:016}", i),
                names: vec![format!("/c{}", i)],
                state: "running".into(),
                ..Default::default()
            })
            .collect();
        app.handle(AppEvent::Refreshed {
            seq: 1,
            result: Ok(ResourceSnapshot { containers, ..Default::default() }),
        });
        app
    }

    #[test]
    fn loading_until_first_resize() {
        let frame = build_frame(&App::new());
        assert_eq!(frame.body, Body::Loading);
    }

    #[test]
    fn header_counts_and_active_tab() {
        let frame = build_frame(&app_with(3));
        assert!(frame.header.title.starts_with("Docker Status v"));
        assert_eq!(frame.header.tabs[0].label, "Containers (3)");
        assert!(frame.header.tabs[0].active);
        assert_eq!(frame.header.tabs[1].label, "Images (0)");
        assert!(!frame.header.tabs[1].active);
    }

    #[test]
    fn table_body_is_the_visible_window() {
        let mut app = app_with(40);
        for _ in 0..25 {
            press(&mut app, 'j');
        }
        let Body::Table(view) = build_frame(&app).body else {
            panic!("expected table body");
        };
        // 30 rows of terminal leave 20 for the table
        assert_eq!(view.rows.len(), 20);
        assert_eq!(view.total_rows, 40);
        assert_eq!(view.selected, Some(19));
        assert_eq!(view.rows[19].cells[1], "c25");
    }

    #[test]
    fn confirmation_replaces_body() {
        let mut app = app_with(1);
        press(&mut app, 'd');
        let frame = build_frame(&app);
        assert!(frame.body.is_full_screen());
        match frame.body {
            Body::Confirmation(dialog) => {
                assert!(dialog.message.contains("delete container"));
                assert_eq!(dialog.hint, CONFIRM_HINT);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn grouped_legend_and_error_preference() {
        let mut app = app_with(1);
        press(&mut app, 'g');
        app.handle(AppEvent::Refreshed { seq: 2, result: Err("connection refused".into()) });
        let frame = build_frame(&app);
        assert!(frame.footer.legend.contains(&"[grouped by compose]"));
        assert!(frame.footer.legend.contains(&"D: delete group"));
        assert_eq!(frame.footer.status.text(), "Error: connection refused");
    }

    #[test]
    fn help_and_logs_bodies() {
        let mut app = app_with(1);
        press(&mut app, '?');
        assert_eq!(build_frame(&app).body, Body::Help(HELP_SECTIONS));
        press(&mut app, '?');
        press(&mut app, 'L');
        assert_eq!(
            build_frame(&app).body,
            Body::Logs { container: Some("c0".into()) }
        );
    }
}
