use std::io::{self, Write};

use crossterm::{
    queue,
    style::{ResetColor, SetForegroundColor},
};

use super::shared::writeln;
use super::theme::Theme;

pub fn render_logs(out: &mut impl Write, container: Option<&str>, theme: &Theme) -> io::Result<()> {
    queue!(out, SetForegroundColor(theme.palette.text_secondary))?;
    match container {
        Some(name) => writeln(out, &format!("  Container logs view (coming soon): {}", name))?,
        None => writeln(out, "  Container logs view (coming soon)")?,
    }
    queue!(out, ResetColor)?;
    writeln(out, "")?;
    queue!(out, SetForegroundColor(theme.palette.text_muted))?;
    writeln(out, "  Press esc to return to the container list.")?;
    queue!(out, ResetColor)?;
    Ok(())
}
