//! CodeLanguage - Fenced code block language resolution

/// Language used when neither the paragraph nor the notebook names one
pub const DEFAULT_LANGUAGE: &str = "scala";

/// Helpers mapping Zeppelin interpreter and editor names to
/// Markdown code fence languages
pub struct CodeLanguage;

impl CodeLanguage {
    /// Map an Ace editor mode (`ace/mode/python`) to a language
    ///
    /// Only Scala and Python editors change the notebook default.
    pub fn from_editor_mode(mode: &str) -> Option<&'static str> {
        match mode {
            "ace/mode/scala" => Some("scala"),
            "ace/mode/python" => Some("python"),
            _ => None,
        }
    }

    /// Resolve interpreter aliases to the fence language
    pub fn from_interpreter(interpreter: &str) -> &str {
        match interpreter {
            "pyspark" => "python",
            other => other,
        }
    }

    /// Final segment of an editor mode (`ace/mode/markdown` -> `markdown`)
    pub fn mode_name(mode: &str) -> &str {
        mode.rsplit('/').next().unwrap_or(mode)
    }
}
