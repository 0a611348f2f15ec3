//! Column width distribution for the resource tables.

/// Absolute floor for a column when the terminal is narrower than the sum of minimums.
pub const ABSOLUTE_MIN_WIDTH: usize = 8;

/// Horizontal space reserved for borders and padding.
pub const HORIZONTAL_CHROME: usize = 4;
/// Rows reserved for header and footer.
pub const VERTICAL_CHROME: usize = 10;
/// Smallest table viewport height.
pub const MIN_TABLE_HEIGHT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub min_width: usize,
    pub preferred_width: usize,
}

impl ColumnSpec {
    pub const fn new(title: &'static str, min_width: usize, preferred_width: usize) -> Self {
        Self { title, min_width, preferred_width }
    }
}

/// A laid-out column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
}

pub const CONTAINER_COLUMNS: [ColumnSpec; 7] = [
    ColumnSpec::new("ID", 12, 12),
    ColumnSpec::new("Names", 15, 30),
    ColumnSpec::new("Image", 15, 25),
    ColumnSpec::new("Command", 15, 16),
    ColumnSpec::new("Created", 15, 20),
    ColumnSpec::new("Status", 15, 25),
    ColumnSpec::new("Ports", 15, 20),
];

pub const IMAGE_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::new("Repository", 15, 30),
    ColumnSpec::new("Tag", 10, 15),
    ColumnSpec::new("Image ID", 12, 12),
    ColumnSpec::new("Created", 15, 16),
    ColumnSpec::new("Size", 10, 12),
];

pub const NETWORK_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::new("ID", 12, 12),
    ColumnSpec::new("Name", 15, 25),
    ColumnSpec::new("Driver", 10, 15),
    ColumnSpec::new("Scope", 8, 10),
    ColumnSpec::new("Created", 15, 16),
];

pub const VOLUME_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec::new("Name", 15, 25),
    ColumnSpec::new("Driver", 10, 15),
    ColumnSpec::new("Mountpoint", 20, 40),
    ColumnSpec::new("Created", 15, 16),
];

/// Width available to a table for a terminal `cols` wide.
pub fn table_width(cols: u16) -> usize {
    (cols as usize).saturating_sub(HORIZONTAL_CHROME)
}

/// Table viewport height for a terminal `rows` high.
pub fn table_height(rows: u16) -> usize {
    (rows as usize).saturating_sub(VERTICAL_CHROME).max(MIN_TABLE_HEIGHT)
}

/// Distribute `available` columns of width across `specs`.
///
/// Three regimes:
/// - below the sum of minimums every column scales down from its minimum,
///   floored at [`ABSOLUTE_MIN_WIDTH`] (the total may then exceed `available`);
/// - at or above the sum of preferred widths the surplus is shared equally,
///   the remainder going one unit at a time to the leading columns;
/// - in between every column scales down from its preferred width, floored
///   at its own minimum.
pub fn distribute_widths(specs: &[ColumnSpec], available: usize) -> Vec<Column> {
    if specs.is_empty() {
        return Vec::new();
    }

    let total_min: usize = specs.iter().map(|s| s.min_width).sum();
    if available < total_min {
        let scale = available as f64 / total_min as f64;
        return specs
            .iter()
            .map(|s| Column {
                title: s.title,
                width: ((s.min_width as f64 * scale) as usize).max(ABSOLUTE_MIN_WIDTH),
            })
            .collect();
    }

    let total_preferred: usize = specs.iter().map(|s| s.preferred_width).sum();
    if available >= total_preferred {
        let extra = available - total_preferred;
        let per_column = extra / specs.len();
        let remainder = extra % specs.len();
        return specs
            .iter()
            .enumerate()
            .map(|(i, s)| Column {
                title: s.title,
                width: s.preferred_width + per_column + usize::from(i < remainder),
            })
            .collect();
    }

    let scale = available as f64 / total_preferred as f64;
    specs
        .iter()
        .map(|s| Column {
            title: s.title,
            width: ((s.preferred_width as f64 * scale) as usize).max(s.min_width),
        })
        .collect()
}
