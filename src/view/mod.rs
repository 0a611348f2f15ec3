mod confirmation;
mod frame;
mod help;
mod logs;
mod shared;
mod tab_bar;
mod table;
mod theme;

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, ResetColor, SetForegroundColor},
    terminal,
};

pub use frame::{Body, Dialog, Footer, Frame, Header, HelpSection, StatusLine, Tab, TableView};
pub use help::HELP_SECTIONS;
pub use shared::{fit_cell, truncate_str};
pub use theme::{Palette, Theme, ThemeName};

pub struct Presenter;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

impl Presenter {
    /// Paint a whole frame. The caller flushes.
    pub fn paint(out: &mut impl Write, frame: &Frame, theme: &Theme, size: (u16, u16)) -> io::Result<()> {
        let (cols, rows) = size;
        queue!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;

        match &frame.body {
            Body::Loading => return Self::render_centered(out, "Loading...", theme.palette.text_muted, size),
            Body::Confirmation(dialog) => {
                return confirmation::render_confirmation(out, dialog, theme, size);
            }
            _ => {}
        }

        if Self::render_size_guard(out, size)? {
            return Ok(());
        }

        tab_bar::render_tab_bar(out, &frame.header, theme, cols)?;
        shared::writeln(out, "")?;

        match &frame.body {
            Body::Table(view) => table::render_table(out, view, theme)?,
            Body::Help(sections) => help::render_help(out, sections, theme)?,
            Body::Logs { container } => logs::render_logs(out, container.as_deref(), theme)?,
            Body::Loading | Body::Confirmation(_) => {}
        }

        Self::render_footer(out, &frame.footer, theme, (cols, rows))
    }

    /// If the terminal is too small, paint a notice and return `true`
    /// (meaning "skip normal rendering").
    pub fn render_size_guard(out: &mut impl Write, size: (u16, u16)) -> io::Result<bool> {
        let (cols, rows) = size;
        if cols < MIN_COLS || rows < MIN_ROWS {
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            Self::render_centered(out, &msg, Color::Yellow, size)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn render_centered(out: &mut impl Write, msg: &str, color: Color, size: (u16, u16)) -> io::Result<()> {
        let (cols, rows) = size;
        let msg = truncate_str(msg, cols as usize);
        queue!(
            out,
            cursor::MoveTo(shared::centre_offset(&msg, cols), rows / 2),
            SetForegroundColor(color)
        )?;
        write!(out, "{}", msg)?;
        queue!(out, ResetColor)?;
        Ok(())
    }

    /// Legend on the second to last line, status or error on the last.
    fn render_footer(out: &mut impl Write, footer: &Footer, theme: &Theme, size: (u16, u16)) -> io::Result<()> {
        let (cols, rows) = size;
        let width = cols as usize;

        let legend = truncate_str(&footer.legend.join(" • "), width.saturating_sub(2));
        queue!(
            out,
            cursor::MoveTo(0, rows.saturating_sub(2)),
            SetForegroundColor(theme.palette.text_muted)
        )?;
        write!(out, "  {}", legend)?;

        let color = match footer.status {
            StatusLine::Error(_) => theme.palette.error,
            StatusLine::Info(_) => theme.palette.info,
            StatusLine::Empty => theme.palette.text_muted,
        };
        let status = truncate_str(&footer.status.text(), width.saturating_sub(2));
        queue!(out, cursor::MoveTo(0, rows.saturating_sub(1)), SetForegroundColor(color))?;
        write!(out, "  {}", status)?;
        queue!(out, ResetColor)?;
        Ok(())
    }
}
