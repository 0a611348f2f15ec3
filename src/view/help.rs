use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, ResetColor, SetAttribute, SetForegroundColor};

use super::frame::HelpSection;
use super::shared::writeln;
use super::theme::Theme;

pub const HELP_SECTIONS: &[HelpSection] = &[
    HelpSection {
        title: "Navigation",
        entries: &[
            ("1-4", "Switch to Containers, Images, Networks, Volumes"),
            ("tab", "Next view"),
            ("↑/k ↓/j", "Move selection"),
            ("pgup/pgdn", "Scroll a page"),
            ("home/end", "First or last row"),
            ("esc", "Leave logs or help"),
        ],
    },
    HelpSection {
        title: "Actions",
        entries: &[
            ("r, ctrl+r", "Refresh now"),
            ("d, delete", "Delete selected resource"),
            ("ctrl+s", "Stop selected container"),
            ("L", "Container logs"),
        ],
    },
    HelpSection {
        title: "Compose",
        entries: &[
            ("g", "Group containers by compose project"),
            ("s", "Stop selected stack"),
            ("S", "Start selected stack"),
            ("D", "Delete selected stack"),
        ],
    },
    HelpSection {
        title: "General",
        entries: &[("?", "Toggle this help"), ("q, ctrl+c", "Quit")],
    },
];

pub fn render_help(out: &mut impl Write, sections: &[HelpSection], theme: &Theme) -> io::Result<()> {
    let key_width = sections
        .iter()
        .flat_map(|s| s.entries.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    for section in sections {
        queue!(out, SetForegroundColor(theme.palette.primary), SetAttribute(Attribute::Bold))?;
        writeln(out, &format!("  {}", section.title))?;
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;

        for (key, description) in section.entries {
            queue!(out, SetForegroundColor(theme.palette.accent))?;
            write!(out, "    {:<width$}", key, width = key_width)?;
            queue!(out, SetForegroundColor(theme.palette.text_primary))?;
            writeln(out, &format!("  {}", description))?;
            queue!(out, ResetColor)?;
        }
        writeln(out, "")?;
    }
    Ok(())
}
