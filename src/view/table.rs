use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Color, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};

use crate::table::{RowTone, TableRow};

use super::frame::TableView;
use super::shared::{fit_cell, writeln};
use super::theme::Theme;

const INDENT: &str = "  ";

pub fn render_table(out: &mut impl Write, view: &TableView, theme: &Theme) -> io::Result<()> {
    let palette = &theme.palette;

    let header: String = view
        .columns
        .iter()
        .map(|c| fit_cell(c.title, c.width))
        .collect();
    queue!(out, SetForegroundColor(palette.secondary), SetAttribute(Attribute::Bold))?;
    writeln(out, &format!("{}{}", INDENT, header))?;
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;

    if view.total_rows == 0 {
        queue!(out, SetForegroundColor(palette.text_muted))?;
        writeln(out, &format!("{}{}", INDENT, view.empty_message))?;
        queue!(out, ResetColor)?;
        return Ok(());
    }

    for (i, row) in view.rows.iter().enumerate() {
        let selected = view.selected == Some(i);
        render_row(out, view, row, selected, theme)?;
    }
    Ok(())
}

fn render_row(
    out: &mut impl Write,
    view: &TableView,
    row: &TableRow,
    selected: bool,
    theme: &Theme,
) -> io::Result<()> {
    let palette = &theme.palette;
    let color: Color = match row.tone {
        RowTone::Normal | RowTone::GroupHeader => palette.text_primary,
        RowTone::Muted => palette.text_muted,
        RowTone::Error => palette.error,
    };

    let line: String = view
        .columns
        .iter()
        .zip(&row.cells)
        .map(|(col, cell)| fit_cell(cell, col.width))
        .collect();

    write!(out, "{}", INDENT)?;
    if selected {
        queue!(out, SetBackgroundColor(palette.text_highlight), SetForegroundColor(Color::Black))?;
    } else {
        queue!(out, SetForegroundColor(color))?;
    }
    if row.tone == RowTone::GroupHeader {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    write!(out, "{}", line)?;
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    write!(out, "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Column;

    fn paint(view: &TableView) -> String {
        let mut out = Vec::new();
        render_table(&mut out, view, &Theme::default()).expect("paint");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn group_headers_use_the_normal_tone() {
        let palette = Theme::default().palette;
        let view = TableView {
            columns: vec![Column { title: "Name", width: 24 }],
            rows: vec![TableRow::new(vec!["📁 web (2 containers)".into()]).with_tone(RowTone::GroupHeader)],
            selected: None,
            total_rows: 1,
            empty_message: "No containers",
        };
        let painted = paint(&view);

        let fg = |c: Color| {
            let mut s = Vec::new();
            queue!(s, SetForegroundColor(c)).expect("queue");
            String::from_utf8(s).expect("utf8")
        };
        assert!(painted.contains(&fg(palette.text_primary)));
        assert!(!painted.contains(&fg(palette.accent)));
    }
}
