//! Table rendering
//!
//! Zeppelin tables arrive either as tab separated text (one row per line)
//! or, from some interpreters, as JSON `{"data": [...], "exceeded": n}`.

use serde_json::Value;

/// Rows shown when Zeppelin reports the table exceeded its display limit
pub const DEFAULT_ROW_LIMIT: usize = 20;

/// A table row before Markdown formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Tab separated line
    Line(String),
    /// Pre-split cells
    Cells(Vec<String>),
}

impl TableRow {
    fn cells(&self) -> Vec<&str> {
        match self {
            TableRow::Line(line) if line.is_empty() => Vec::new(),
            TableRow::Line(line) => line.split('\t').collect(),
            TableRow::Cells(cells) => cells.iter().map(String::as_str).collect(),
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => TableRow::Line(s.clone()),
            Value::Array(items) => TableRow::Cells(items.iter().map(cell_text).collect()),
            other => TableRow::Line(other.to_string()),
        }
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Split a table message into rows
///
/// JSON payloads honour `exceeded`: anything other than `-1` truncates
/// to `row_limit` rows. Everything else is read line by line.
pub fn parse_table(msg: &str, row_limit: usize) -> Vec<TableRow> {
    if let Some(rows) = parse_json_table(msg, row_limit) {
        return rows;
    }

    msg.split('\n')
        .map(|l| TableRow::Line(l.to_string()))
        .collect()
}

fn parse_json_table(msg: &str, row_limit: usize) -> Option<Vec<TableRow>> {
    let value: Value = serde_json::from_str(msg).ok()?;
    let object = value.as_object()?;

    let data = match object.get("data") {
        Some(Value::Array(data)) => data,
        _ => {
            tracing::warn!("JSON table without a data array, reading it as text");
            return None;
        }
    };

    let exceeded = object.get("exceeded").and_then(Value::as_i64);
    let rows = data.iter().map(TableRow::from_json);

    Some(match exceeded {
        Some(-1) => rows.collect(),
        _ => rows.take(row_limit).collect(),
    })
}

/// Format one row as Markdown
///
/// Empty rows yield `None`. A single cell is emitted as plain text;
/// header rows carry the `|-|` separator on a second line.
pub fn markdown_row(row: &TableRow, header: bool) -> Option<String> {
    let cols = row.cells();

    match cols.len() {
        0 => None,
        1 => Some(cols[0].to_string()),
        n => {
            let mut line = String::from("|");
            for col in &cols {
                line.push_str(col);
                line.push('|');
            }

            if header {
                line.push('\n');
                line.push('|');
                line.push_str(&"-|".repeat(n));
            }

            Some(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(s: &str) -> TableRow {
        TableRow::Line(s.to_string())
    }

    #[test]
    fn test_markdown_row() {
        assert_eq!(markdown_row(&line(""), false), None);
        assert_eq!(markdown_row(&line("test"), false), Some("test".to_string()));
        assert_eq!(
            markdown_row(&line("test\ttest2"), false),
            Some("|test|test2|".to_string())
        );
        assert_eq!(
            markdown_row(&line("test\t\ttest2"), false),
            Some("|test||test2|".to_string())
        );
    }

    #[test]
    fn test_markdown_header_row() {
        assert_eq!(
            markdown_row(&line("test\ttest2"), true),
            Some("|test|test2|\n|-|-|".to_string())
        );
    }

    #[test]
    fn test_cells_row() {
        let row = TableRow::Cells(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(
            markdown_row(&row, true),
            Some("|a|b|c|\n|-|-|-|".to_string())
        );
        assert_eq!(markdown_row(&TableRow::Cells(vec![]), false), None);
    }

    #[test]
    fn test_parse_tab_separated() {
        let rows = parse_table("name\tage\nann\t3\n", DEFAULT_ROW_LIMIT);
        assert_eq!(rows, vec![line("name\tage"), line("ann\t3"), line("")]);
    }

    #[test]
    fn test_parse_json_respects_exceeded() {
        let data: Vec<String> = (0..30).map(|i| format!("\"r{}\"", i)).collect();
        let truncated = format!("{{\"exceeded\": 1, \"data\": [{}]}}", data.join(","));
        let full = format!("{{\"exceeded\": -1, \"data\": [{}]}}", data.join(","));

        assert_eq!(parse_table(&truncated, DEFAULT_ROW_LIMIT).len(), 20);
        assert_eq!(parse_table(&full, DEFAULT_ROW_LIMIT).len(), 30);
    }

    #[test]
    fn test_parse_json_cells() {
        let rows = parse_table(r#"{"exceeded": -1, "data": [["k", "v"], ["x", 1]]}"#, 20);
        assert_eq!(
            rows,
            vec![
                TableRow::Cells(vec!["k".into(), "v".into()]),
                TableRow::Cells(vec!["x".into(), "1".into()]),
            ]
        );
    }

    #[test]
    fn test_json_scalar_falls_back_to_text() {
        assert_eq!(parse_table("42", 20), vec![line("42")]);
    }
}
