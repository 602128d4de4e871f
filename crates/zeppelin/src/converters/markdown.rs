//! Markdown Converter
//!
//! Walks notebook paragraphs and builds the Markdown document.
//! Format differences are delegated to a `ResultDialect`; images
//! go through an `ImageSink`.

use std::io::Write;

use super::dialect::{ResultDialect, ResultRoute};
use super::legacy::LegacyDialect;
use super::new::NewDialect;
use super::options::ConverterOptions;
use super::table::{markdown_row, parse_table, TableRow};
use crate::domain::{
    CodeLanguage, ConvertError, MarkdownDocument, NoteMetadata, Notebook, NotebookFormat,
    OutputType, Paragraph, ParagraphConfig, Timestamp, DEFAULT_LANGUAGE,
};
use crate::ports::ImageSink;

const ERROR_MARKER: &str = ":heavy_exclamation_mark:";

/// Converter for Zeppelin 0.6.x notebooks
pub type LegacyConverter<S> = MarkdownConverter<LegacyDialect, S>;

/// Converter for Zeppelin 0.7.x notebooks
pub type NewConverter<S> = MarkdownConverter<NewDialect, S>;

/// Notebook to Markdown converter
///
/// A converter holds the state of a single conversion (image counter,
/// author, dates, default language); create a fresh one per notebook.
pub struct MarkdownConverter<D, S> {
    dialect: D,
    sink: S,
    table_row_limit: usize,
    index: usize,
    language: Option<String>,
    meta: NoteMetadata,
    out: MarkdownDocument,
}

impl<S: ImageSink> MarkdownConverter<LegacyDialect, S> {
    pub fn legacy(sink: S, options: ConverterOptions) -> Self {
        Self::new(LegacyDialect, sink, options)
    }
}

impl<S: ImageSink> MarkdownConverter<NewDialect, S> {
    pub fn new_format(sink: S, options: ConverterOptions) -> Self {
        Self::new(NewDialect, sink, options)
    }
}

impl<D: ResultDialect, S: ImageSink> MarkdownConverter<D, S> {
    pub fn new(dialect: D, sink: S, options: ConverterOptions) -> Self {
        Self {
            dialect,
            sink,
            table_row_limit: options.table_row_limit,
            index: 0,
            language: options.language,
            meta: NoteMetadata {
                user: options.user,
                ..Default::default()
            },
            out: MarkdownDocument::new(),
        }
    }

    pub fn format(&self) -> NotebookFormat {
        self.dialect.format()
    }

    pub fn document(&self) -> &MarkdownDocument {
        &self.out
    }

    pub fn metadata(&self) -> &NoteMetadata {
        &self.meta
    }

    /// Number of images written so far
    pub fn image_count(&self) -> usize {
        self.index
    }

    pub fn into_parts(self) -> (MarkdownDocument, S) {
        (self.out, self.sink)
    }

    /// Convert a notebook and write the Markdown to `out`
    pub fn convert<W: Write>(
        &mut self,
        notebook: &Notebook,
        out: &mut W,
    ) -> Result<(), ConvertError> {
        self.build_document(notebook)?;
        self.out.write_to(out).map_err(ConvertError::Output)
    }

    /// Build body and front matter without writing anything
    pub fn build_document(&mut self, notebook: &Notebook) -> Result<(), ConvertError> {
        tracing::info!(
            name = %notebook.name,
            format = %self.dialect.format(),
            paragraphs = notebook.paragraphs.len(),
            "Converting notebook"
        );

        self.build_markdown_body(notebook)?;
        self.build_header(&notebook.name);
        Ok(())
    }

    /// Prepend the front matter block
    pub fn build_header(&mut self, title: &str) {
        self.out.prepend([
            "---".to_string(),
            format!("title: {}", title),
            format!("author(s): {}", self.meta.user),
            "tags: ".to_string(),
            format!("created_at: {}", self.meta.created_label()),
            format!("updated_at: {}", self.meta.updated_label()),
            "---".to_string(),
        ]);
    }

    /// Process every paragraph in notebook order
    pub fn build_markdown_body(&mut self, notebook: &Notebook) -> Result<(), ConvertError> {
        for (i, paragraph) in notebook.paragraphs.iter().enumerate() {
            tracing::debug!(paragraph = i, "Processing paragraph");
            self.process_paragraph(paragraph)?;
        }
        Ok(())
    }

    fn process_paragraph(&mut self, paragraph: &Paragraph) -> Result<(), ConvertError> {
        if let Some(user) = &paragraph.user {
            self.meta.user = user.clone();
        }

        if let Some(text) = &paragraph.date_created {
            if let Err(e) = self.process_date_created(text) {
                tracing::warn!("Skipping dateCreated: {}", e);
            }
        }
        if let Some(text) = &paragraph.date_updated {
            if let Err(e) = self.process_date_updated(text) {
                tracing::warn!("Skipping dateUpdated: {}", e);
            }
        }
        if let Some(title) = &paragraph.title {
            self.process_title(title);
        }
        if let Some(config) = &paragraph.config {
            self.process_config(config);
        }
        if let Some(text) = &paragraph.text {
            self.process_input(text);
        }

        self.process_results(paragraph)
    }

    pub fn build_markdown(&mut self, body: Option<&str>) {
        if let Some(body) = body {
            self.out.push(body);
        }
    }

    /// Wrap `body` in a fenced code block
    pub fn build_code(&mut self, lang: &str, body: Option<&str>) {
        self.out.push(format!("```{}", lang));
        self.build_markdown(body);
        self.out.push("```");
    }

    /// Split paragraph source into interpreter and body
    ///
    /// `%md text` gives `("md", Some("text"))`. Without a `%` directive
    /// the whole trimmed text is the body, in the default language.
    pub fn parse_input_text(&self, text: &str) -> (String, Option<String>) {
        let trimmed = text.trim_start();
        let (first, rest) = match trimmed.find(char::is_whitespace) {
            Some(i) => (&trimmed[..i], trimmed[i..].trim_start()),
            None => (trimmed, ""),
        };

        match first.strip_prefix('%') {
            Some(lang) => {
                let body = (!rest.is_empty()).then(|| rest.to_string());
                (lang.to_string(), body)
            }
            None => {
                let lang = self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
                (lang.to_string(), Some(text.trim().to_string()))
            }
        }
    }

    pub fn process_input(&mut self, text: &str) {
        let (lang, body) = self.parse_input_text(text);

        if lang == "md" {
            self.build_markdown(body.as_deref());
        } else {
            self.build_code(CodeLanguage::from_interpreter(&lang), body.as_deref());
        }
    }

    /// Switch the default language to the paragraph's editor mode
    pub fn process_config(&mut self, config: &ParagraphConfig) {
        let Some(mode) = config.editor_mode.as_deref() else {
            return;
        };

        if let Some(lang) = CodeLanguage::from_editor_mode(mode) {
            self.language = Some(lang.to_string());
        }
    }

    pub fn process_date_created(&mut self, text: &str) -> Result<(), ConvertError> {
        let date = Timestamp::parse(text)?;
        self.meta.observe_created(date);
        Ok(())
    }

    pub fn process_date_updated(&mut self, text: &str) -> Result<(), ConvertError> {
        let date = Timestamp::parse(text)?;
        self.meta.observe_updated(date);
        Ok(())
    }

    /// Paragraph titles become level-4 headings
    pub fn process_title(&mut self, text: &str) {
        self.out.push(format!("#### {}", text));
    }

    pub fn process_results(&mut self, paragraph: &Paragraph) -> Result<(), ConvertError> {
        match self.dialect.route(paragraph) {
            ResultRoute::Render(output_type, msg) => {
                tracing::debug!(
                    key = self.dialect.format().result_key(),
                    %output_type,
                    "Rendering result"
                );
                self.render_output(output_type, msg)?;
            }
            ResultRoute::Failed => self.out.push(ERROR_MARKER),
            ResultRoute::Skip => {}
        }
        Ok(())
    }

    fn render_output(&mut self, output_type: OutputType, msg: &str) -> Result<(), ConvertError> {
        match output_type {
            OutputType::Html => self.build_image(msg)?,
            OutputType::Text => self.build_repl_result(msg),
            OutputType::Table => self.build_table(msg),
        }
        Ok(())
    }

    /// Render REPL output as a commented Python block
    pub fn build_repl_result(&mut self, msg: &str) {
        let commented: Vec<String> = msg.split('\n').map(|m| format!("# {}", m.trim())).collect();
        self.build_code("python", Some(&commented.join("\n")));
    }

    pub fn build_text(&mut self, msg: &str) {
        self.out.push(msg);
    }

    /// Emit a table; the first row is the header
    pub fn build_table(&mut self, msg: &str) {
        let rows = parse_table(msg, self.table_row_limit);
        let mut rows = rows.iter();

        if let Some(header) = rows.next() {
            self.create_md_row(header, true);
        }
        for row in rows {
            self.create_md_row(row, false);
        }
    }

    pub fn create_md_row(&mut self, row: &TableRow, header: bool) {
        if let Some(line) = markdown_row(row, header) {
            self.out.push(line);
        }
    }

    /// Extract an image from an HTML result and link it
    ///
    /// Results without an image are dropped. Images that fail to decode
    /// are logged and skipped.
    pub fn build_image(&mut self, msg: &str) -> Result<(), ConvertError> {
        let Some(found) = self.dialect.find_image(msg) else {
            return Ok(());
        };

        let png = match self.dialect.decode_image(found) {
            Ok(png) => png,
            Err(e) => {
                tracing::warn!("Skipping image: {}", e);
                return Ok(());
            }
        };

        self.index += 1;
        let file_name = format!("output_{}.png", self.index);
        let link = self.sink.store(&file_name, &png)?;

        self.out.push(format!("\n![png]({})\n", link));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryImageSink;
    use crate::domain::{LegacyResult, ResultCode};

    fn zc() -> LegacyConverter<MemoryImageSink> {
        MarkdownConverter::legacy(MemoryImageSink::new(), ConverterOptions::default())
    }

    fn lines(zc: &LegacyConverter<MemoryImageSink>) -> Vec<&str> {
        zc.document().lines().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_header() {
        let mut zc = zc();
        zc.meta.user = "tester".to_string();
        zc.build_header("title");
        assert_eq!(
            lines(&zc),
            [
                "---",
                "title: title",
                "author(s): tester",
                "tags: ",
                "created_at: N/A",
                "updated_at: N/A",
                "---",
            ]
        );
    }

    #[test]
    fn test_build_markdown() {
        let mut zc = zc();
        zc.build_markdown(None);
        assert!(zc.document().is_empty());
        zc.build_markdown(Some("sample body"));
        assert_eq!(lines(&zc), ["sample body"]);
    }

    #[test]
    fn test_build_code() {
        let mut zc = zc();
        zc.build_code("scala", None);
        assert_eq!(lines(&zc), ["```scala", "```"]);
        zc.build_code("scala", Some("sample body"));
        assert_eq!(
            lines(&zc),
            ["```scala", "```", "```scala", "sample body", "```"]
        );
    }

    #[test]
    fn test_parse_input_text() {
        let zc = zc();
        let cases = [
            ("%md", "md", None),
            ("%md text", "md", Some("text")),
            (" %md   text", "md", Some("text")),
            ("%md   ", "md", None),
            (" sample text", "scala", Some("sample text")),
            ("s%ample", "scala", Some("s%ample")),
        ];

        for (input, lang, body) in cases {
            let (got_lang, got_body) = zc.parse_input_text(input);
            assert_eq!(got_lang, lang, "input {:?}", input);
            assert_eq!(got_body.as_deref(), body, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_input_keeps_multiline_body() {
        let (lang, body) = zc().parse_input_text("%sql\nselect 1\nfrom t");
        assert_eq!(lang, "sql");
        assert_eq!(body.as_deref(), Some("select 1\nfrom t"));
    }

    #[test]
    fn test_process_input() {
        let mut zc = zc();
        zc.process_input("%md # Heading");
        zc.process_input("%pyspark print(1)");
        zc.process_input("val x = 1");
        assert_eq!(
            lines(&zc),
            [
                "# Heading",
                "```python",
                "print(1)",
                "```",
                "```scala",
                "val x = 1",
                "```",
            ]
        );
    }

    #[test]
    fn test_process_config_sets_default_language() {
        let mut zc = zc();
        zc.process_config(&ParagraphConfig {
            editor_mode: Some("ace/mode/python".to_string()),
        });
        zc.process_config(&ParagraphConfig {
            editor_mode: Some("ace/mode/sql".to_string()),
        });
        zc.process_config(&ParagraphConfig::default());

        let (lang, _) = zc.parse_input_text("x = 1");
        assert_eq!(lang, "python");
    }

    #[test]
    fn test_language_option() {
        let zc = MarkdownConverter::legacy(
            MemoryImageSink::new(),
            ConverterOptions::new().with_language("r"),
        );
        assert_eq!(zc.parse_input_text("x <- 1").0, "r");
    }

    #[test]
    fn test_build_text() {
        let mut zc = zc();
        zc.build_text("one ring to rule them all");
        zc.build_text("one ring to find them");
        assert_eq!(
            lines(&zc),
            ["one ring to rule them all", "one ring to find them"]
        );
    }

    #[test]
    fn test_title() {
        let mut zc = zc();
        assert!(zc.document().is_empty());
        zc.process_title("title");
        assert_eq!(lines(&zc), ["#### title"]);
    }

    #[test]
    fn test_create_md_row() {
        let cases: [(&str, &[&str]); 4] = [
            ("", &[]),
            ("test", &["test"]),
            ("test\ttest2", &["|test|test2|"]),
            ("test\t\ttest2", &["|test||test2|"]),
        ];

        for (input, expected) in cases {
            let mut zc = zc();
            zc.create_md_row(&TableRow::Line(input.to_string()), false);
            assert_eq!(lines(&zc), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_create_md_row_header() {
        let mut zc = zc();
        zc.create_md_row(&TableRow::Line("test\ttest2".to_string()), true);
        assert_eq!(lines(&zc), ["|test|test2|\n|-|-|"]);
    }

    #[test]
    fn test_build_table() {
        let mut zc = zc();
        zc.build_table("name\tcount\nfoo\t1\nbar\t2\n");
        assert_eq!(
            lines(&zc),
            ["|name|count|\n|-|-|", "|foo|1|", "|bar|2|"]
        );
    }

    #[test]
    fn test_process_date_created() {
        let mut zc = zc();
        zc.process_date_created("Feb 28, 2017 3:44:54 PM").unwrap();
        zc.process_date_created("Feb 28, 2017 4:44:54 PM").unwrap();
        assert_eq!(
            zc.metadata().date_created,
            Some(Timestamp::parse("Feb 28, 2017 3:44:54 PM").unwrap())
        );

        zc.meta.date_created = None;
        zc.process_date_created("2015-07-03T01:43:40+0000").unwrap();
        zc.process_date_created("2015-07-04T01:43:40+0000").unwrap();
        assert_eq!(zc.metadata().created_label(), "2015-07-03 01:43:40+00:00");
    }

    #[test]
    fn test_process_date_updated() {
        let mut zc = zc();
        zc.process_date_updated("Feb 28, 2017 3:44:54 PM").unwrap();
        zc.process_date_updated("Feb 28, 2017 4:44:54 PM").unwrap();
        assert_eq!(zc.metadata().updated_label(), "2017-02-28 16:44:54");

        zc.meta.date_updated = None;
        zc.process_date_updated("2015-07-03T01:43:40+0000").unwrap();
        zc.process_date_updated("2015-07-04T01:43:40+0000").unwrap();
        assert_eq!(zc.metadata().updated_label(), "2015-07-04 01:43:40+00:00");
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        let mut zc = zc();
        assert!(matches!(
            zc.process_date_created("not a date"),
            Err(ConvertError::InvalidDate(_))
        ));
        assert_eq!(zc.metadata().created_label(), "N/A");
    }

    fn legacy_result(code: ResultCode, output_type: Option<&str>, msg: &str) -> Paragraph {
        Paragraph {
            result: Some(LegacyResult {
                code,
                output_type: output_type.map(str::to_string),
                msg: Some(msg.to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_process_results() {
        let mut zc = zc();

        zc.process_results(&Paragraph::default()).unwrap();
        assert!(zc.document().is_empty());

        zc.process_results(&legacy_result(ResultCode::Success, None, ""))
            .unwrap();
        assert!(zc.document().is_empty());

        zc.process_results(&legacy_result(
            ResultCode::Success,
            Some("TEXT"),
            "one ring to bring them all",
        ))
        .unwrap();
        assert_eq!(
            lines(&zc),
            ["```python", "# one ring to bring them all", "```"]
        );
    }

    #[test]
    fn test_process_results_error_marker() {
        let mut zc = zc();
        zc.process_results(&legacy_result(ResultCode::Error, Some("TEXT"), "boom"))
            .unwrap();
        assert_eq!(lines(&zc), [":heavy_exclamation_mark:"]);
    }

    #[test]
    fn test_build_repl_result_trims_lines() {
        let mut zc = zc();
        zc.build_repl_result("  a  \nb\r");
        assert_eq!(lines(&zc), ["```python", "# a\n# b", "```"]);
    }

    #[test]
    fn test_build_image_numbers_outputs() {
        let svg = "<svg width=\"4\" height=\"4\"><rect width=\"4\" height=\"4\"/></svg>";
        let mut zc = zc();

        zc.build_image("<p>no chart</p>").unwrap();
        zc.build_image(svg).unwrap();
        zc.build_image(svg).unwrap();

        assert_eq!(zc.image_count(), 2);
        assert_eq!(
            lines(&zc),
            [
                "\n![png](images/output_1.png)\n",
                "\n![png](images/output_2.png)\n",
            ]
        );

        let (_, sink) = zc.into_parts();
        let names: Vec<&str> = sink.images().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["output_1.png", "output_2.png"]);
    }

    #[test]
    fn test_build_image_skips_undecodable() {
        let mut zc = zc();
        zc.build_image("<svg><g></svg>").unwrap();
        assert_eq!(zc.image_count(), 0);
        assert!(zc.document().is_empty());
    }
}
