use chrono::{DateTime, Local};

use crate::layout::NETWORK_COLUMNS;
use crate::model::NetworkInfo;

use super::{TableRow, TableState};

#[derive(Clone, Debug)]
pub struct NetworkTable {
    pub state: TableState,
}

impl Default for NetworkTable {
    fn default() -> Self {
        Self { state: TableState::new(&NETWORK_COLUMNS) }
    }
}

impl NetworkTable {
    pub fn update(&mut self, networks: &[NetworkInfo]) {
        self.state.set_rows(networks.iter().map(network_row).collect());
    }

    pub fn selected<'a>(&self, networks: &'a [NetworkInfo]) -> Option<&'a NetworkInfo> {
        networks.get(self.state.selected()?)
    }
}

fn network_row(net: &NetworkInfo) -> TableRow {
    TableRow::new(vec![
        net.short_id().to_string(),
        net.name.clone(),
        net.driver.clone(),
        net.scope.clone(),
        net.created.as_deref().map(format_created).unwrap_or_default(),
    ])
}

// The daemon reports "0001-01-01T00:00:00Z" for networks without a creation time.
fn format_created(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) if dt.timestamp() > 0 => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        _ => String::new(),
    }
}
