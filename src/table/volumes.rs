use crate::layout::VOLUME_COLUMNS;
use crate::model::VolumeInfo;

use super::{TableRow, TableState};

#[derive(Clone, Debug)]
pub struct VolumeTable {
    pub state: TableState,
}

impl Default for VolumeTable {
    fn default() -> Self {
        Self { state: TableState::new(&VOLUME_COLUMNS) }
    }
}

impl VolumeTable {
    pub fn update(&mut self, volumes: &[VolumeInfo]) {
        self.state.set_rows(volumes.iter().map(volume_row).collect());
    }

    pub fn selected<'a>(&self, volumes: &'a [VolumeInfo]) -> Option<&'a VolumeInfo> {
        volumes.get(self.state.selected()?)
    }
}

fn volume_row(vol: &VolumeInfo) -> TableRow {
    // Date and time portion of the RFC 3339 CreatedAt
    let created = vol
        .created_at
        .as_deref()
        .map(|c| c.chars().take(16).collect::<String>())
        .unwrap_or_default();
    TableRow::new(vec![vol.name.clone(), vol.driver.clone(), vol.mountpoint.clone(), created])
}
