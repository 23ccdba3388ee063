//! Tabular CSV export.
//!
//! Serializes a report table to comma-separated text: one output line per
//! row, one column per cell, in display order. Every cell is quoted and
//! embedded quote characters are doubled, so consumers never need to
//! guess at the dialect.

/// A rendered table: column headers plus rows of pre-formatted cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Render the table as CSV text, header line first.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_line(&mut out, &self.columns);
        for row in &self.rows {
            write_line(&mut out, row);
        }
        out
    }
}

fn write_line(out: &mut String, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(&cell.replace('"', "\"\""));
        out.push('"');
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_is_quoted() {
        let mut t = Table::new(vec!["Title", "ISBN"]);
        t.push_row(vec!["Dune", "9780441172719"]);
        assert_eq!(t.to_csv(), "\"Title\",\"ISBN\"\r\n\"Dune\",\"9780441172719\"\r\n");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let mut t = Table::new(vec!["A", "B"]);
        t.push_row(vec!["He said \"hi\"", "plain"]);
        t.push_row(vec!["x", "y"]);
        let csv = t.to_csv();
        assert!(csv.contains("\"He said \"\"hi\"\"\""));
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn commas_and_newlines_stay_inside_the_cell() {
        let mut t = Table::new(vec!["Notes"]);
        t.push_row(vec!["late, damaged"]);
        let csv = t.to_csv();
        assert_eq!(csv, "\"Notes\"\r\n\"late, damaged\"\r\n");
    }

    #[test]
    fn empty_table_renders_header_only() {
        let t = Table::new(vec!["Only", "Header"]);
        assert_eq!(t.to_csv(), "\"Only\",\"Header\"\r\n");
    }
}
