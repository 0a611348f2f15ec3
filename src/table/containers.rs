use crate::grouping::{self, ContainerGroup};
use crate::layout::CONTAINER_COLUMNS;
use crate::model::{ContainerInfo, PortMapping};

use super::{format_timestamp, RowTone, TableRow, TableState};

/// Container table, flat or grouped by compose project.
#[derive(Clone, Debug)]
pub struct ContainerTable {
    pub state: TableState,
    grouped: bool,
    groups: Vec<ContainerGroup>,
}

impl Default for ContainerTable {
    fn default() -> Self {
        Self {
            state: TableState::new(&CONTAINER_COLUMNS),
            grouped: false,
            groups: Vec::new(),
        }
    }
}

impl ContainerTable {
    /// Rebuild rows from the current container list. Groups are recomputed
    /// from scratch whenever grouping is on.
    pub fn update(&mut self, containers: &[ContainerInfo], grouped: bool) {
        self.grouped = grouped;
        if grouped {
            self.groups = grouping::group_containers(containers);
            let rows = grouped_rows(&self.groups);
            self.state.set_rows(rows);
        } else {
            self.groups.clear();
            self.state.set_rows(containers.iter().map(container_row).collect());
        }
    }

    /// The container under the cursor. Header rows select nothing.
    pub fn selected_container<'a>(&'a self, containers: &'a [ContainerInfo]) -> Option<&'a ContainerInfo> {
        let cursor = self.state.selected()?;
        if self.grouped {
            grouping::container_at(&self.groups, cursor)
        } else {
            containers.get(cursor)
        }
    }

    /// The group whose header or member row is under the cursor.
    pub fn selected_group(&self) -> Option<&ContainerGroup> {
        if !self.grouped {
            return None;
        }
        grouping::group_at(&self.groups, self.state.selected()?)
    }
}

fn display_names(c: &ContainerInfo) -> String {
    let names = c.names.join(", ");
    names.strip_prefix('/').map(str::to_string).unwrap_or(names)
}

fn tone_for_state(state: &str) -> RowTone {
    match state {
        "running" => RowTone::Normal,
        "exited" => RowTone::Muted,
        _ => RowTone::Error,
    }
}

/// Status text with a running/not-running marker.
pub fn status_cell(c: &ContainerInfo) -> String {
    if c.is_running() {
        format!("✓ {}", c.status)
    } else {
        format!("✗ {}", c.status)
    }
}

/// Ports as `public->private/proto` or `private/proto`, shortened when long.
pub fn format_ports(ports: &[PortMapping]) -> String {
    let joined = ports
        .iter()
        .map(|p| match p.public_port {
            Some(public) if public > 0 => format!("{}->{}/{}", public, p.private_port, p.protocol),
            _ => format!("{}/{}", p.private_port, p.protocol),
        })
        .collect::<Vec<_>>()
        .join(", ");

    if joined.chars().count() > 23 {
        let head: String = joined.chars().take(20).collect();
        format!("{}...", head)
    } else {
        joined
    }
}

fn container_cells(c: &ContainerInfo) -> Vec<String> {
    vec![
        c.short_id().to_string(),
        display_names(c),
        c.image.clone(),
        c.command.clone(),
        format_timestamp(c.created),
        status_cell(c),
        format_ports(&c.ports),
    ]
}

fn container_row(c: &ContainerInfo) -> TableRow {
    TableRow::new(container_cells(c)).with_tone(tone_for_state(&c.state))
}

fn grouped_rows(groups: &[ContainerGroup]) -> Vec<TableRow> {
    let mut rows = Vec::with_capacity(grouping::row_count(groups));
    for group in groups {
        rows.push(
            TableRow::new(vec![
                String::new(),
                format!("📁 {} ({} containers)", group.name, group.containers.len()),
                String::new(),
                String::new(),
                group.status_summary(),
                group.ports_summary(),
                String::new(),
            ])
            .with_tone(RowTone::GroupHeader),
        );

        for c in &group.containers {
            let cells = container_cells(c)
                .into_iter()
                .enumerate()
                .map(|(i, cell)| if i == 1 { format!(" |{}", cell) } else { format!("  {}", cell) })
                .collect();
            rows.push(TableRow::new(cells).with_tone(tone_for_state(&c.state)));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::COMPOSE_PROJECT_LABEL;

    fn container(id: &str, name: &str, state: &str, project: Option<&str>) -> ContainerInfo {
        let mut c = ContainerInfo {
            id: id.into(),
            names: vec![format!("/{}", name)],
            state: state.into(),
            status: if state == "running" { "Up 1 hour".into() } else { "Exited (0)".into() },
            ..Default::default()
        };
        if let Some(p) = project {
            c.labels.insert(COMPOSE_PROJECT_LABEL.into(), p.into());
        }
        c
    }

    fn sample() -> Vec<ContainerInfo> {
        vec![
            container("aaaaaaaaaaaa1111", "web-app", "running", Some("web")),
            container("bbbbbbbbbbbb2222", "web-db", "exited", Some("web")),
            container("cccccccccccc3333", "solo", "dead", None),
        ]
    }

    #[test]
    fn flat_rows_follow_snapshot_order() {
        let containers = sample();
        let mut table = ContainerTable::default();
        table.update(&containers, false);
        assert_eq!(table.state.rows.len(), 3);
        assert_eq!(table.state.rows[0].cells[0], "aaaaaaaaaaaa");
        assert_eq!(table.state.rows[0].cells[1], "web-app");
        assert_eq!(table.state.rows[0].cells[5], "✓ Up 1 hour");
        assert_eq!(table.state.rows[1].tone, RowTone::Muted);
        assert_eq!(table.state.rows[2].tone, RowTone::Error);
        assert!(table.selected_group().is_none());
    }

    #[test]
    fn grouped_rows_have_headers_and_indented_members() {
        let containers = sample();
        let mut table = ContainerTable::default();
        table.update(&containers, true);
        let rows = &table.state.rows;
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].cells[1], "📁 web (2 containers)");
        assert_eq!(rows[0].cells[4], "1/2 running");
        assert_eq!(rows[0].tone, RowTone::GroupHeader);
        assert_eq!(rows[1].cells[0], "  aaaaaaaaaaaa");
        assert_eq!(rows[1].cells[1], " |web-app");
        assert_eq!(rows[3].cells[1], "📁 Standalone Containers (1 containers)");
    }

    #[test]
    fn grouped_selection_walks_flattened_rows() {
        let containers = sample();
        let mut table = ContainerTable::default();
        table.update(&containers, true);

        assert!(table.selected_container(&containers).is_none());
        assert_eq!(table.selected_group().map(|g| g.name.as_str()), Some("web"));

        table.state.move_down(2);
        assert_eq!(
            table.selected_container(&containers).map(|c| c.id.as_str()),
            Some("bbbbbbbbbbbb2222")
        );
        assert_eq!(table.selected_group().map(|g| g.name.as_str()), Some("web"));

        table.state.move_down(2);
        assert_eq!(
            table.selected_container(&containers).map(|c| c.id.as_str()),
            Some("cccccccccccc3333")
        );
    }

    #[test]
    fn empty_table_selects_nothing() {
        let mut table = ContainerTable::default();
        table.update(&[], false);
        assert!(table.selected_container(&[]).is_none());
    }

    #[test]
    fn ports_are_shortened() {
        let ports: Vec<PortMapping> = [(8080, 80), (8443, 443), (9000, 9000)]
            .iter()
            .map(|(public, private)| PortMapping {
                ip: None,
                private_port: *private,
                public_port: Some(*public),
                protocol: "tcp".into(),
            })
            .collect();
        assert_eq!(format_ports(&ports[..1]), "8080->80/tcp");
        assert_eq!(format_ports(&ports), "8080->80/tcp, 8443->...");

        let exposed = PortMapping { private_port: 6379, protocol: "tcp".into(), ..Default::default() };
        assert_eq!(format_ports(&[exposed]), "6379/tcp");
    }
}
