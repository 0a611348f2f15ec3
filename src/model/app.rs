/// App-level view mode. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Containers,
    Images,
    Networks,
    Volumes,
    Logs,
    Help,
}

impl ViewMode {
    /// The resource views shown in the tab strip, in tab order.
    pub const TABS: [ViewMode; 4] = [
        ViewMode::Containers,
        ViewMode::Images,
        ViewMode::Networks,
        ViewMode::Volumes,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Containers => "Containers",
            ViewMode::Images => "Images",
            ViewMode::Networks => "Networks",
            ViewMode::Volumes => "Volumes",
            ViewMode::Logs => "Logs",
            ViewMode::Help => "Help",
        }
    }

    /// Next view in the Tab cycle. Logs and Help fall back to Containers.
    pub fn next(self) -> ViewMode {
        match self {
            ViewMode::Containers => ViewMode::Images,
            ViewMode::Images => ViewMode::Networks,
            ViewMode::Networks => ViewMode::Volumes,
            ViewMode::Volumes | ViewMode::Logs | ViewMode::Help => ViewMode::Containers,
        }
    }

    /// Direct jump target for the digit keys 1-4.
    pub fn from_digit(digit: char) -> Option<ViewMode> {
        match digit {
            '1' => Some(ViewMode::Containers),
            '2' => Some(ViewMode::Images),
            '3' => Some(ViewMode::Networks),
            '4' => Some(ViewMode::Volumes),
            _ => None,
        }
    }
}
