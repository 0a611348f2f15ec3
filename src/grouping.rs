//! Compose project grouping of the container list.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{
    ContainerInfo, COMPOSE_LABEL_PREFIX, COMPOSE_PROJECT_LABEL, COMPOSE_SERVICE_LABEL,
    STACK_NAMESPACE_LABEL,
};

/// Bucket for containers carrying no compose labels. Always sorted last.
pub const STANDALONE_GROUP: &str = "Standalone Containers";
/// Bucket for containers with compose labels but no project label.
pub const UNKNOWN_GROUP: &str = "Unknown Project";
/// Suffix marking a swarm stack group apart from a compose project.
pub const STACK_SUFFIX: &str = " (stack)";

/// Maximum number of distinct ports listed on a group header.
const MAX_HEADER_PORTS: usize = 3;

/// How a group key was derived.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKind {
    /// Compose project; carries the project name usable with `docker compose -p`.
    Compose(String),
    Stack,
    Unknown,
    Standalone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerGroup {
    pub name: String,
    pub kind: GroupKind,
    pub containers: Vec<ContainerInfo>,
}

impl ContainerGroup {
    /// Compose project name when the group can be operated on as a stack.
    pub fn project(&self) -> Option<&str> {
        match &self.kind {
            GroupKind::Compose(project) => Some(project),
            _ => None,
        }
    }

    /// Compose service names of the members, deduplicated and sorted.
    pub fn services(&self) -> Vec<String> {
        self.containers
            .iter()
            .filter_map(|c| c.label(COMPOSE_SERVICE_LABEL))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn running_count(&self) -> usize {
        self.containers.iter().filter(|c| c.is_running()).count()
    }

    /// Aggregate status, e.g. "1/2 running" or "2/2 stopped".
    pub fn status_summary(&self) -> String {
        let total = self.containers.len();
        if total == 0 {
            return String::new();
        }
        let running = self.running_count();
        if running == 0 {
            format!("{}/{} stopped", total, total)
        } else {
            format!("{}/{} running", running, total)
        }
    }

    /// Distinct published ports across members, sorted; capped at three entries.
    pub fn ports_summary(&self) -> String {
        let ports: BTreeSet<String> = self
            .containers
            .iter()
            .flat_map(|c| c.ports.iter())
            .filter_map(|p| p.public_port.map(|public| format!("{}->{}", public, p.private_port)))
            .collect();

        if ports.len() > MAX_HEADER_PORTS {
            let head: Vec<&str> = ports.iter().take(MAX_HEADER_PORTS).map(String::as_str).collect();
            format!("{}... ({} ports)", head.join(", "), ports.len())
        } else {
            ports.into_iter().collect::<Vec<_>>().join(", ")
        }
    }
}

/// Derive the group key and kind for a container from its labels.
pub fn group_key(container: &ContainerInfo) -> (String, GroupKind) {
    if let Some(project) = container.label(COMPOSE_PROJECT_LABEL) {
        return (project.to_string(), GroupKind::Compose(project.to_string()));
    }
    if let Some(stack) = container.label(STACK_NAMESPACE_LABEL) {
        return (format!("{}{}", stack, STACK_SUFFIX), GroupKind::Stack);
    }
    let has_compose_labels = container
        .labels
        .keys()
        .any(|k| k.starts_with(COMPOSE_LABEL_PREFIX));
    if has_compose_labels {
        (UNKNOWN_GROUP.to_string(), GroupKind::Unknown)
    } else {
        (STANDALONE_GROUP.to_string(), GroupKind::Standalone)
    }
}

/// Partition containers into groups.
///
/// Members are sorted by primary name (stable, so ties keep input order);
/// groups are sorted by name with the standalone bucket always last.
/// Buckets are keyed on name and kind, so a project whose name matches a
/// sentinel bucket never absorbs it.
pub fn group_containers(containers: &[ContainerInfo]) -> Vec<ContainerGroup> {
    let mut buckets: BTreeMap<(String, GroupKind), ContainerGroup> = BTreeMap::new();

    for c in containers {
        let (name, kind) = group_key(c);
        buckets
            .entry((name.clone(), kind.clone()))
            .or_insert_with(|| ContainerGroup { name, kind, containers: Vec::new() })
            .containers
            .push(c.clone());
    }

    let mut standalone = None;
    let mut groups = Vec::with_capacity(buckets.len());
    for (_, mut group) in buckets {
        group.containers.sort_by(|a, b| a.primary_name().cmp(b.primary_name()));
        if group.kind == GroupKind::Standalone {
            standalone = Some(group);
        } else {
            groups.push(group);
        }
    }
    groups.extend(standalone);
    groups
}

/// One row of the flattened grouped table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupedRow {
    Header { group: usize },
    Member { group: usize, container: usize },
}

impl GroupedRow {
    pub fn group(self) -> usize {
        match self {
            GroupedRow::Header { group } | GroupedRow::Member { group, .. } => group,
        }
    }
}

/// Flatten groups into display order: each header followed by its members.
pub fn flatten(groups: &[ContainerGroup]) -> Vec<GroupedRow> {
    let mut rows = Vec::new();
    for (g, group) in groups.iter().enumerate() {
        rows.push(GroupedRow::Header { group: g });
        rows.extend((0..group.containers.len()).map(|c| GroupedRow::Member { group: g, container: c }));
    }
    rows
}

/// Resolve which row is at the given cursor position.
pub fn resolve_row(groups: &[ContainerGroup], cursor: usize) -> Option<GroupedRow> {
    let mut row_idx: usize = 0;

    for (g, group) in groups.iter().enumerate() {
        if cursor == row_idx {
            return Some(GroupedRow::Header { group: g });
        }
        row_idx += 1;

        let members = group.containers.len();
        if cursor < row_idx + members {
            return Some(GroupedRow::Member { group: g, container: cursor - row_idx });
        }
        row_idx += members;
    }

    None
}

/// Cursor position of a row; the inverse of [`resolve_row`].
pub fn row_position(groups: &[ContainerGroup], row: GroupedRow) -> Option<usize> {
    let g = row.group();
    let group = groups.get(g)?;
    let start: usize = groups[..g].iter().map(|grp| grp.containers.len() + 1).sum();
    match row {
        GroupedRow::Header { .. } => Some(start),
        GroupedRow::Member { container, .. } if container < group.containers.len() => {
            Some(start + 1 + container)
        }
        GroupedRow::Member { .. } => None,
    }
}

/// Container at the cursor; `None` on a header row or out of range.
pub fn container_at(groups: &[ContainerGroup], cursor: usize) -> Option<&ContainerInfo> {
    match resolve_row(groups, cursor)? {
        GroupedRow::Member { group, container } => groups[group].containers.get(container),
        GroupedRow::Header { .. } => None,
    }
}

/// Group whose header or member row is at the cursor.
pub fn group_at(groups: &[ContainerGroup], cursor: usize) -> Option<&ContainerGroup> {
    resolve_row(groups, cursor).and_then(|row| groups.get(row.group()))
}

/// Total number of flattened rows.
pub fn row_count(groups: &[ContainerGroup]) -> usize {
    groups.iter().map(|g| g.containers.len() + 1).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::PortMapping;

    fn container(id: &str, name: &str, state: &str, labels: &[(&str, &str)]) -> ContainerInfo {
        ContainerInfo {
            id: id.into(),
            names: vec![format!("/{}", name)],
            state: state.into(),
            labels: labels
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<HashMap<_, _>>(),
            ..Default::default()
        }
    }

    fn with_ports(mut c: ContainerInfo, ports: &[(u16, u16)]) -> ContainerInfo {
        c.ports = ports
            .iter()
            .map(|(public, private)| PortMapping {
                ip: Some("0.0.0.0".into()),
                private_port: *private,
                public_port: Some(*public),
                protocol: "tcp".into(),
            })
            .collect();
        c
    }

    #[test]
    fn compose_and_standalone_groups() {
        let containers = vec![
            container("c3", "lonely", "running", &[]),
            container("c2", "web-db", "exited", &[(COMPOSE_PROJECT_LABEL, "web")]),
            container("c1", "web-app", "running", &[(COMPOSE_PROJECT_LABEL, "web")]),
        ];
        let groups = group_containers(&containers);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["web", STANDALONE_GROUP]);
        assert_eq!(groups[0].status_summary(), "1/2 running");
        assert_eq!(groups[0].containers[0].primary_name(), "web-app");
        assert_eq!(groups[1].containers.len(), 1);
    }

    #[test]
    fn standalone_sorts_last_even_after_later_names() {
        let containers = vec![
            container("a", "a", "running", &[]),
            container("b", "b", "running", &[(COMPOSE_PROJECT_LABEL, "zzz")]),
            container("c", "c", "running", &[(COMPOSE_PROJECT_LABEL, "Alpha")]),
        ];
        let names: Vec<_> = group_containers(&containers)
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "zzz", STANDALONE_GROUP]);
    }

    #[test]
    fn stack_and_unknown_keys() {
        let stack = container("s", "s", "running", &[(STACK_NAMESPACE_LABEL, "prod")]);
        assert_eq!(group_key(&stack), ("prod (stack)".to_string(), GroupKind::Stack));

        let odd = container("u", "u", "running", &[("com.docker.compose.service", "api")]);
        assert_eq!(group_key(&odd), (UNKNOWN_GROUP.to_string(), GroupKind::Unknown));

        let plain = container("p", "p", "running", &[("maintainer", "me")]);
        assert_eq!(group_key(&plain).1, GroupKind::Standalone);
    }

    #[test]
    fn grouping_is_deterministic() {
        let containers = vec![
            container("1", "b", "running", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("2", "a", "running", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("3", "a", "exited", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("4", "z", "running", &[]),
        ];
        let first = group_containers(&containers);
        let second = group_containers(&containers);
        assert_eq!(first, second);
        // Equal names keep input order
        let ids: Vec<_> = first[0].containers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn project_named_like_a_bucket_stays_separate() {
        let containers = vec![
            container("1", "a", "running", &[(COMPOSE_PROJECT_LABEL, STANDALONE_GROUP)]),
            container("2", "b", "running", &[]),
            container("3", "c", "running", &[(COMPOSE_PROJECT_LABEL, "zzz")]),
            container("4", "d", "running", &[(COMPOSE_PROJECT_LABEL, "x (stack)")]),
            container("5", "e", "running", &[(STACK_NAMESPACE_LABEL, "x")]),
        ];
        let groups = group_containers(&containers);
        let keys: Vec<_> = groups.iter().map(|g| (g.name.as_str(), &g.kind, g.containers.len())).collect();
        assert_eq!(
            keys,
            vec![
                (STANDALONE_GROUP, &GroupKind::Compose(STANDALONE_GROUP.into()), 1),
                ("x (stack)", &GroupKind::Compose("x (stack)".into()), 1),
                ("x (stack)", &GroupKind::Stack, 1),
                ("zzz", &GroupKind::Compose("zzz".into()), 1),
                (STANDALONE_GROUP, &GroupKind::Standalone, 1),
            ]
        );
    }

    #[test]
    fn all_stopped_summary() {
        let containers = vec![
            container("1", "a", "exited", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("2", "b", "created", &[(COMPOSE_PROJECT_LABEL, "x")]),
        ];
        assert_eq!(group_containers(&containers)[0].status_summary(), "2/2 stopped");
    }

    #[test]
    fn header_ports_capped_at_three() {
        let labels = [(COMPOSE_PROJECT_LABEL, "x")];
        let containers = vec![
            with_ports(container("1", "a", "running", &labels), &[(8080, 80), (8443, 443)]),
            with_ports(container("2", "b", "running", &labels), &[(5432, 5432), (8080, 80)]),
            with_ports(container("3", "c", "running", &labels), &[(6379, 6379)]),
        ];
        let groups = group_containers(&containers);
        assert_eq!(
            groups[0].ports_summary(),
            "5432->5432, 6379->6379, 8080->80... (4 ports)"
        );

        let few = group_containers(&containers[..1]);
        assert_eq!(few[0].ports_summary(), "8080->80, 8443->443");
    }

    #[test]
    fn services_come_from_labels() {
        let containers = vec![
            container("1", "a", "running", &[(COMPOSE_PROJECT_LABEL, "x"), (COMPOSE_SERVICE_LABEL, "web")]),
            container("2", "b", "running", &[(COMPOSE_PROJECT_LABEL, "x"), (COMPOSE_SERVICE_LABEL, "db")]),
            container("3", "c", "running", &[(COMPOSE_PROJECT_LABEL, "x")]),
        ];
        let groups = group_containers(&containers);
        assert_eq!(groups[0].services(), vec!["db".to_string(), "web".to_string()]);
        assert_eq!(groups[0].project(), Some("x"));
    }

    #[test]
    fn resolve_and_position_are_inverse() {
        let containers = vec![
            container("1", "a", "running", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("2", "b", "running", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("3", "c", "running", &[(COMPOSE_PROJECT_LABEL, "y")]),
            container("4", "d", "running", &[]),
        ];
        let groups = group_containers(&containers);
        let rows = flatten(&groups);
        assert_eq!(rows.len(), row_count(&groups));
        for (cursor, row) in rows.iter().enumerate() {
            let resolved = resolve_row(&groups, cursor).expect("row in range");
            assert_eq!(resolved, *row);
            assert_eq!(row_position(&groups, resolved), Some(cursor));
        }
        assert_eq!(resolve_row(&groups, rows.len()), None);
    }

    #[test]
    fn header_rows_never_resolve_to_a_container() {
        let containers = vec![
            container("1", "a", "running", &[(COMPOSE_PROJECT_LABEL, "x")]),
            container("2", "b", "running", &[]),
        ];
        let groups = group_containers(&containers);
        assert!(container_at(&groups, 0).is_none());
        assert_eq!(container_at(&groups, 1).map(|c| c.id.as_str()), Some("1"));
        assert!(container_at(&groups, 2).is_none());
        assert_eq!(container_at(&groups, 3).map(|c| c.id.as_str()), Some("2"));
        assert_eq!(group_at(&groups, 3).map(|g| g.name.as_str()), Some(STANDALONE_GROUP));
        assert!(group_at(&groups, 4).is_none());
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_containers(&[]).is_empty());
        assert_eq!(resolve_row(&[], 0), None);
    }
}
