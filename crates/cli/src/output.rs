//! Result printing: pretty JSON, aligned tables, or `key<TAB>value` records.

use std::io::Write;

use serde::Serialize;

/// Spaces between table columns.
const COLUMN_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Plain,
}

/// Writes command results to `out` in the selected mode.
///
/// In JSON mode the serialised value is printed; in plain mode the
/// pre-rendered cells are.
pub struct Printer<W> {
    mode: OutputMode,
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(mode: OutputMode, out: W) -> Self {
        Self { mode, out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints a collection. In plain mode `headers` and `rows` form a table
    /// with columns padded to their widest cell.
    pub fn rows<T>(&mut self, value: &T, headers: &[&str], rows: &[Vec<String>]) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        match self.mode {
            OutputMode::Json => self.json(value),
            OutputMode::Plain => {
                let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
                let lines: Vec<&[String]> = std::iter::once(header.as_slice())
                    .chain(rows.iter().map(Vec::as_slice))
                    .collect();

                let columns = lines.iter().map(|l| l.len()).max().unwrap_or(0);
                let mut widths = vec![0; columns];
                for line in &lines {
                    for (width, cell) in widths.iter_mut().zip(line.iter()) {
                        *width = (*width).max(cell.chars().count());
                    }
                }

                for line in lines {
                    let mut text = String::new();
                    for (i, cell) in line.iter().enumerate() {
                        text.push_str(cell);
                        if i + 1 < line.len() {
                            let pad = widths[i] - cell.chars().count() + COLUMN_GAP;
                            text.extend(std::iter::repeat(' ').take(pad));
                        }
                    }
                    writeln!(self.out, "{}", text.trim_end())?;
                }
                Ok(())
            }
        }
    }

    /// Prints a single record as `key<TAB>value` lines in plain mode.
    pub fn record<T>(&mut self, value: &T, pairs: &[(&str, String)]) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        match self.mode {
            OutputMode::Json => self.json(value),
            OutputMode::Plain => {
                for (key, val) in pairs {
                    writeln!(self.out, "{key}\t{val}")?;
                }
                Ok(())
            }
        }
    }

    /// Prints a confirmation line; JSON mode prints `{"ok": true, "message": ...}`.
    pub fn done(&mut self, message: &str) -> anyhow::Result<()> {
        match self.mode {
            OutputMode::Json => self.json(&serde_json::json!({ "ok": true, "message": message })),
            OutputMode::Plain => Ok(writeln!(self.out, "{message}")?),
        }
    }

    fn json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// `"yes"` / `"no"`.
pub fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
