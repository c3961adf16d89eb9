//! Markdown table builder.

/// A Markdown table with a fixed header row
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; cells are escaped, missing cells render empty
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Render the table, one line per row, trailing newline included
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&render_line(&self.headers));
        out.push_str(&render_line(
            &self.headers.iter().map(|_| "---".to_string()).collect::<Vec<_>>(),
        ));
        for row in &self.rows {
            out.push_str(&render_line(row));
        }
        out
    }
}

fn render_line(cells: &[String]) -> String {
    let mut line = String::from("|");
    for cell in cells {
        if cell.is_empty() {
            line.push_str(" |");
        } else {
            line.push(' ');
            line.push_str(cell);
            line.push_str(" |");
        }
    }
    line.push('\n');
    line
}

/// Keep a cell on one line and stop pipes from splitting it
pub fn escape_cell(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let mut table = Table::new(["A", "B"]);
        table.push_row(vec!["1".to_string(), "2".to_string()]);

        assert_eq!(table.render(), "| A | B |\n| --- | --- |\n| 1 | 2 |\n");
    }

    #[test]
    fn test_empty_and_missing_cells() {
        let mut table = Table::new(["A", "B", "C"]);
        table.push_row(vec![String::new(), "x".to_string()]);

        assert!(table.render().ends_with("| | x | |\n"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line one\nline two"), "line one line two");
        assert_eq!(escape_cell("  padded "), "padded");
    }
}
