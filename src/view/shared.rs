use std::io::{self, Write};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string to at most `max_len` terminal columns, appending "..."
/// if truncated. Wide glyphs (emoji, CJK) count as two columns.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.width() <= max_len {
        return s.to_string();
    }
    let budget = max_len.saturating_sub(3);
    let mut used = 0;
    let mut truncated = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        truncated.push(ch);
    }
    format!("{}...", truncated)
}

/// Fit a cell into exactly `width` columns, leaving one column of gap.
pub fn fit_cell(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let text = truncate_str(s, width.saturating_sub(1));
    let pad = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(pad))
}

/// Left pad to centre `text` in `width` columns.
pub fn centre_offset(text: &str, width: u16) -> u16 {
    let len = text.width().min(u16::MAX as usize) as u16;
    width.saturating_sub(len) / 2
}

pub fn writeln(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}\r\n", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_long_string() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_str_utf8() {
        assert_eq!(truncate_str("café", 4), "café");
        assert_eq!(truncate_str("日本語", 6), "日本語");
        assert_eq!(truncate_str("日本語", 5), "日...");
        assert_eq!(truncate_str("hello世界", 6), "hel...");
    }

    #[test]
    fn fit_cell_pads_and_truncates() {
        assert_eq!(fit_cell("web", 6), "web   ");
        assert_eq!(fit_cell("abcdefghij", 6), "ab... ");
        assert_eq!(fit_cell("anything", 0), "");
        assert_eq!(fit_cell("✓ Up", 5), "✓ Up ");
    }

    #[test]
    fn fit_cell_counts_wide_glyphs_as_two_columns() {
        let header = fit_cell("📁 web (2 containers)", 12);
        assert_eq!(header.width(), 12);
        assert_eq!(header, "📁 web (... ");
        assert_eq!(fit_cell("📁 db", 8).width(), 8);
    }

    #[test]
    fn centre_offset_clamps() {
        assert_eq!(centre_offset("abcd", 10), 3);
        assert_eq!(centre_offset("too long for it", 4), 0);
    }
}
