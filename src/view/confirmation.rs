use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, ResetColor, SetAttribute, SetForegroundColor},
};

use super::frame::Dialog;
use super::shared::{centre_offset, truncate_str};
use super::theme::Theme;

/// Full-screen dialog: bordered box with the message and the y/n hint.
pub fn render_confirmation(out: &mut impl Write, dialog: &Dialog, theme: &Theme, size: (u16, u16)) -> io::Result<()> {
    let (cols, rows) = size;
    let palette = &theme.palette;

    let inner = (cols as usize).saturating_sub(8).clamp(10, 70);
    let lines = wrap(&dialog.message, inner);
    let box_height = lines.len() as u16 + 4;
    let top = rows.saturating_sub(box_height) / 2;
    let left = cols.saturating_sub(inner as u16 + 4) / 2;

    let border = format!("+{}+", "-".repeat(inner + 2));
    queue!(out, SetForegroundColor(palette.warning))?;
    queue!(out, MoveTo(left, top))?;
    write!(out, "{}", border)?;

    let mut y = top + 1;
    for line in &lines {
        queue!(out, MoveTo(left, y), SetForegroundColor(palette.warning))?;
        write!(out, "| ")?;
        queue!(out, SetForegroundColor(palette.text_primary), SetAttribute(Attribute::Bold))?;
        write!(out, "{:<width$}", line, width = inner)?;
        queue!(out, SetAttribute(Attribute::Reset), SetForegroundColor(palette.warning))?;
        write!(out, " |")?;
        y += 1;
    }
    queue!(out, MoveTo(left, y))?;
    write!(out, "|{}|", " ".repeat(inner + 2))?;
    queue!(out, MoveTo(left, y + 1))?;
    write!(out, "{}", border)?;

    let hint = truncate_str(dialog.hint, cols as usize);
    queue!(out, MoveTo(centre_offset(&hint, cols), y + 3), SetForegroundColor(palette.text_muted))?;
    write!(out, "{}", hint)?;
    queue!(out, ResetColor)?;
    Ok(())
}

/// Greedy word wrap by character count.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { 0 } else { 1 } + word.chars().count();
        if !current.is_empty() && current.chars().count() + needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&truncate_str(word, width));
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
