//! A minimal grid table renderer for console output.
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Rows of pre-formatted cells. The first column is left aligned, the rest
/// right aligned, unless overridden.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    aligns: Vec<Align>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let aligns = (0..headers.len())
            .map(|i| if i == 0 { Align::Left } else { Align::Right })
            .collect();
        Self { headers, rows: Vec::new(), aligns }
    }

    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Short rows are padded with empty cells; extra cells are dropped.
    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        let mut cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());
        self.rows.push(cells);
        self
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|c| {
                self.rows
                    .iter()
                    .map(|r| width(&r[c]))
                    .chain(std::iter::once(width(&self.headers[c])))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let rule = |fill: char| -> String {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat(fill).take(w + 2));
                line.push('+');
            }
            line
        };

        let _ = writeln!(out, "{}", rule('-'));
        self.write_row(&mut out, &self.headers, &widths, true);
        let _ = writeln!(out, "{}", rule('='));
        for row in &self.rows {
            self.write_row(&mut out, row, &widths, false);
            let _ = writeln!(out, "{}", rule('-'));
        }
        if self.rows.is_empty() {
            let _ = writeln!(out, "{}", rule('-'));
        }
        out
    }

    fn write_row(&self, out: &mut String, cells: &[String], widths: &[usize], header: bool) {
        out.push('|');
        for ((cell, w), align) in cells.iter().zip(widths).zip(&self.aligns) {
            let pad = w - width(cell);
            let _ = match (header, align) {
                (true, _) | (false, Align::Left) => write!(out, " {}{} |", cell, " ".repeat(pad)),
                (false, Align::Right) => write!(out, " {}{} |", " ".repeat(pad), cell),
            };
        }
        out.push('\n');
    }
}

/// Display width in characters; every symbol used here is single width.
fn width(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let mut t = Table::new(["Month", "Balance"]);
        t.row(["1", "₹10.00"]).row(["12", "-₹1,000.00"]);
        let expected = "\
+-------+------------+
| Month | Balance    |
+=======+============+
| 1     |     ₹10.00 |
+-------+------------+
| 12    | -₹1,000.00 |
+-------+------------+
";
        assert_eq!(t.render(), expected);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut t = Table::new(["A", "B", "C"]).align(2, Align::Left);
        t.row(["x"]);
        let out = t.render();
        assert!(out.contains("| x |   |   |"), "{}", out);
    }

    #[test]
    fn test_empty_table_still_closes() {
        let t = Table::new(["Only"]);
        assert_eq!(t.render().lines().count(), 4);
    }
}
