//! MarkdownDocument Entity - Lines of the generated Markdown file

use std::io::Write;

use crate::domain::value_objects::Timestamp;

/// Placeholder printed for dates that never appeared in the notebook
pub const NOT_AVAILABLE: &str = "N/A";

/// Front matter values collected while walking paragraphs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    pub user: String,
    pub date_created: Option<Timestamp>,
    pub date_updated: Option<Timestamp>,
}

impl Default for NoteMetadata {
    fn default() -> Self {
        Self {
            user: "anonymous".to_string(),
            date_created: None,
            date_updated: None,
        }
    }
}

impl NoteMetadata {
    /// Keep the oldest creation date
    pub fn observe_created(&mut self, date: Timestamp) {
        match self.date_created {
            Some(current) if current <= date => {}
            _ => self.date_created = Some(date),
        }
    }

    /// Keep the most recent update date
    pub fn observe_updated(&mut self, date: Timestamp) {
        match self.date_updated {
            Some(current) if current >= date => {}
            _ => self.date_updated = Some(date),
        }
    }

    pub fn created_label(&self) -> String {
        date_label(self.date_created.as_ref())
    }

    pub fn updated_label(&self) -> String {
        date_label(self.date_updated.as_ref())
    }
}

fn date_label(date: Option<&Timestamp>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Ordered Markdown lines; joined with `\n` on output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownDocument {
    lines: Vec<String>,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Insert lines ahead of everything written so far
    pub fn prepend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut head: Vec<String> = lines.into_iter().map(Into::into).collect();
        head.append(&mut self.lines);
        self.lines = head;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.render().as_bytes())
    }
}
