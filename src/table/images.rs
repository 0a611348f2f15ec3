use crate::layout::IMAGE_COLUMNS;
use crate::model::ImageInfo;

use super::{format_timestamp, TableRow, TableState};

#[derive(Clone, Debug)]
pub struct ImageTable {
    pub state: TableState,
}

impl Default for ImageTable {
    fn default() -> Self {
        Self { state: TableState::new(&IMAGE_COLUMNS) }
    }
}

impl ImageTable {
    pub fn update(&mut self, images: &[ImageInfo]) {
        self.state.set_rows(images.iter().map(image_row).collect());
    }

    pub fn selected<'a>(&self, images: &'a [ImageInfo]) -> Option<&'a ImageInfo> {
        images.get(self.state.selected()?)
    }
}

fn image_row(img: &ImageInfo) -> TableRow {
    let (repo, tag) = match img.repo_tags.first() {
        Some(repo_tag) if repo_tag != "<none>:<none>" => parse_repo_tag(repo_tag),
        _ => ("<none>".to_string(), "<none>".to_string()),
    };
    TableRow::new(vec![
        repo,
        tag,
        img.short_id().to_string(),
        format_timestamp(img.created),
        format_size(img.size),
    ])
}

/// Split `repo:tag` on the last colon. Missing parts become `<none>`.
pub fn parse_repo_tag(repo_tag: &str) -> (String, String) {
    let none = || "<none>".to_string();
    if repo_tag.is_empty() {
        return (none(), none());
    }
    match repo_tag.rsplit_once(':') {
        None => (repo_tag.to_string(), none()),
        Some((repo, tag)) => {
            let repo = if repo.is_empty() { none() } else { repo.to_string() };
            let tag = if tag.is_empty() { none() } else { tag.to_string() };
            (repo, tag)
        }
    }
}

/// Human-readable byte size with one decimal.
pub fn format_size(size: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let s = size as f64;
    if s >= GB {
        format!("{:.1}GB", s / GB)
    } else if s >= MB {
        format!("{:.1}MB", s / MB)
    } else if s >= KB {
        format!("{:.1}KB", s / KB)
    } else {
        format!("{}B", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_tag_splits_on_last_colon() {
        assert_eq!(parse_repo_tag("nginx:1.25"), ("nginx".into(), "1.25".into()));
        assert_eq!(
            parse_repo_tag("localhost:5000/app:dev"),
            ("localhost:5000/app".into(), "dev".into())
        );
        assert_eq!(parse_repo_tag("busybox"), ("busybox".into(), "<none>".into()));
        assert_eq!(parse_repo_tag(":"), ("<none>".into(), "<none>".into()));
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(2048), "2.0KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0GB");
    }

    #[test]
    fn dangling_image_row() {
        let mut table = ImageTable::default();
        let images = vec![ImageInfo {
            id: "sha256:feedfacecafe0000".into(),
            repo_tags: vec!["<none>:<none>".into()],
            size: 100,
            ..Default::default()
        }];
        table.update(&images);
        let cells = &table.state.rows[0].cells;
        assert_eq!(cells[0], "<none>");
        assert_eq!(cells[1], "<none>");
        assert_eq!(cells[2], "feedfacecafe");
        assert_eq!(table.selected(&images).map(|i| i.size), Some(100));
    }
}
