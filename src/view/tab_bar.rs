use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use super::frame::Header;
use super::theme::Theme;

/// Title on the left, one tab per resource view, separator underneath.
pub fn render_tab_bar(out: &mut impl Write, header: &Header, theme: &Theme, cols: u16) -> io::Result<()> {
    let palette = &theme.palette;

    queue!(out, SetForegroundColor(palette.primary), SetAttribute(Attribute::Bold))?;
    write!(out, "  {} ", header.title)?;
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;

    for tab in &header.tabs {
        write!(out, "  ")?;
        if tab.active {
            queue!(
                out,
                SetBackgroundColor(palette.primary),
                SetForegroundColor(palette.text_primary),
                SetAttribute(Attribute::Bold)
            )?;
        } else {
            queue!(out, SetForegroundColor(palette.text_muted))?;
        }
        write!(out, " {} ", tab.label)?;
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    }
    write!(out, "\r\n")?;

    let sep: String = "─".repeat(cols as usize);
    queue!(out, SetForegroundColor(palette.border))?;
    write!(out, "{}\r\n", sep)?;
    queue!(out, ResetColor, cursor::MoveToColumn(0))?;

    Ok(())
}
