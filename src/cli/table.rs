//! Table formatting utilities for CLI list commands
//!
//! This module provides a unified table output system so every collection's
//! `list` prints the same way. Rows always carry their view position (`@N`)
//! so the numbers can be fed straight back into `edit`, `rm` and friends.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::truncate_str;
use crate::cli::OutputFormat;
use crate::core::catalog::Rgb;
use crate::core::reference::format_position;

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Plain text, truncated to the column width
    Text(String),
    /// Integer value, right aligned
    Number(i64),
    /// Float value with precision
    Float(f64, usize),
    /// Yes/no flag (shown as a check mark)
    Flag(bool),
    /// Stock level, highlighted when at or below the threshold
    Stock { quantity: u32, low: u32 },
    /// Display color swatch
    Swatch(Rgb),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Float(f, precision) => {
                format!("{:>width$.prec$}", f, width = width, prec = precision)
            }
            CellValue::Flag(true) => format!("{:<width$}", style("✓").green(), width = width),
            CellValue::Flag(false) => format!("{:<width$}", style("-").dim(), width = width),
            CellValue::Stock { quantity, low } => {
                let s = quantity.to_string();
                let styled = if *quantity == 0 {
                    style(s).dim()
                } else if quantity <= low {
                    style(s).yellow()
                } else {
                    style(s).green()
                };
                format!("{:>width$}", styled, width = width)
            }
            CellValue::Swatch(rgb) => {
                let block = style("██").color256(ansi256(*rgb));
                format!("{} {:<width$}", block, rgb, width = width.saturating_sub(3))
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Get raw string value (no formatting, for CSV and Markdown output)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Float(f, precision) => format!("{:.prec$}", f, prec = precision),
            CellValue::Flag(b) => if *b { "yes" } else { "no" }.to_string(),
            CellValue::Stock { quantity, .. } => quantity.to_string(),
            CellValue::Swatch(rgb) => rgb.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Flag(true) => "✓".to_string(),
            CellValue::Flag(false) | CellValue::Empty => "-".to_string(),
            other => other.raw(),
        };
        raw.replace('|', "\\|")
    }
}

/// Nearest xterm-256 color cube index for a swatch
fn ansi256(rgb: Rgb) -> u8 {
    let level = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    16 + 36 * level(rgb.r) + 6 * level(rgb.g) + level(rgb.b)
}

/// Column definition with header label and width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    /// Zero-based position in the printed view
    pub position: usize,
    pub full_id: String,
    pub cells: Vec<CellValue>,
}

impl TableRow {
    pub fn new(position: usize, full_id: String, cells: Vec<CellValue>) -> Self {
        Self {
            position,
            full_id,
            cells,
        }
    }
}

/// Renders rows in the line-oriented output formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'a str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'a str) -> Self {
        Self {
            columns,
            entity_name,
            show_summary: true,
        }
    }

    /// Suppress the trailing summary line
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_summary = !quiet;
        self
    }

    /// Print rows in TSV, CSV, Markdown or ID format
    pub fn output(&self, rows: &[TableRow], format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Csv => self.output_csv(rows),
            OutputFormat::Md => {
                self.output_md(rows);
                Ok(())
            }
            OutputFormat::Id => {
                for row in rows {
                    println!("{}", row.full_id);
                }
                Ok(())
            }
            _ => {
                self.output_tsv(rows);
                Ok(())
            }
        }
    }

    fn output_tsv(&self, rows: &[TableRow]) {
        let mut header = vec![format!("{:<6}", style("#").bold().dim())];
        for col in self.columns {
            header.push(format!("{:<width$}", style(col.header).bold(), width = col.width));
        }
        println!("{}", header.join(" "));

        let total_width = 6 + self.columns.iter().map(|c| c.width + 1).sum::<usize>();
        println!("{}", "-".repeat(total_width));

        for row in rows {
            let mut parts = vec![format!("{:<6}", style(format_position(row.position)).cyan())];
            for (col, cell) in self.columns.iter().zip(&row.cells) {
                parts.push(cell.format_tsv(col.width));
            }
            println!("{}", parts.join(" "));
        }

        if self.show_summary {
            println!();
            println!(
                "{} {}(s) found. Use {} to reference by position.",
                style(rows.len()).cyan(),
                self.entity_name,
                style("@N").cyan()
            );
        }
    }

    fn output_csv(&self, rows: &[TableRow]) -> Result<()> {
        let mut writer = csv::Writer::from_writer(std::io::stdout());

        let mut header = vec!["position", "id"];
        header.extend(self.columns.iter().map(|c| c.key));
        writer.write_record(&header).into_diagnostic()?;

        for row in rows {
            let mut record = vec![(row.position + 1).to_string(), row.full_id.clone()];
            record.extend(row.cells.iter().map(CellValue::raw));
            writer.write_record(&record).into_diagnostic()?;
        }

        writer.flush().into_diagnostic()?;
        Ok(())
    }

    fn output_md(&self, rows: &[TableRow]) {
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        println!("| # | {} |", headers.join(" | "));
        println!("|---|{}", "---|".repeat(headers.len()));
        for row in rows {
            let cells: Vec<String> = row.cells.iter().map(CellValue::format_md).collect();
            println!("| {} | {} |", format_position(row.position), cells.join(" | "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values() {
        assert_eq!(CellValue::Number(12).raw(), "12");
        assert_eq!(CellValue::Float(1.26, 1).raw(), "1.3");
        assert_eq!(CellValue::Flag(true).raw(), "yes");
        assert_eq!(CellValue::Stock { quantity: 3, low: 1 }.raw(), "3");
        assert_eq!(CellValue::Swatch(Rgb::new(0, 0, 0)).raw(), "#000000");
        assert_eq!(CellValue::Empty.raw(), "");
    }

    #[test]
    fn test_md_escapes_pipes() {
        assert_eq!(CellValue::Text("a|b".to_string()).format_md(), "a\\|b");
        assert_eq!(CellValue::Flag(false).format_md(), "-");
    }

    #[test]
    fn test_tsv_pads_text() {
        let cell = CellValue::Text("hoop".to_string());
        assert_eq!(cell.format_tsv(8), "hoop    ");
    }

    #[test]
    fn test_tsv_truncates_long_text() {
        let cell = CellValue::Text("a very long needlework kit name".to_string());
        let out = cell.format_tsv(12);
        assert!(out.starts_with("a very ..."));
    }

    #[test]
    fn test_ansi256_extremes() {
        assert_eq!(ansi256(Rgb::new(0, 0, 0)), 16);
        assert_eq!(ansi256(Rgb::new(255, 255, 255)), 231);
    }
}
