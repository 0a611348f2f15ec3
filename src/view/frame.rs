//! Render tree produced from app state and consumed by the painter.

use crate::layout::Column;
use crate::table::TableRow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub header: Header,
    pub body: Body,
    pub footer: Footer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub tabs: Vec<Tab>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tab {
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// Nothing is known about the terminal yet.
    Loading,
    Table(TableView),
    Logs { container: Option<String> },
    Help(&'static [HelpSection]),
    /// Replaces everything else while a confirmation is armed.
    Confirmation(Dialog),
}

impl Body {
    /// Bodies painted without header and footer.
    pub fn is_full_screen(&self) -> bool {
        matches!(self, Body::Loading | Body::Confirmation(_))
    }
}

/// The visible slice of one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    /// Index into `rows` of the cursor row, when it is visible.
    pub selected: Option<usize>,
    pub total_rows: usize,
    pub empty_message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dialog {
    pub message: String,
    pub hint: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footer {
    pub legend: Vec<&'static str>,
    pub status: StatusLine,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusLine {
    #[default]
    Empty,
    Info(String),
    Error(String),
}

impl StatusLine {
    pub fn text(&self) -> String {
        match self {
            StatusLine::Empty => String::new(),
            StatusLine::Info(msg) => msg.clone(),
            StatusLine::Error(err) => format!("Error: {}", err),
        }
    }
}
