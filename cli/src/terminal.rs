//! Line-based prompts on a terminal.

use posts_view::Prompter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Where typed lines come from. `None` means the user gave up on input.
pub trait LineSource {
    fn read_line(&mut self, label: &str) -> Option<String>;
}

/// Lines read through a `rustyline` editor with history.
pub struct EditorLines {
    editor: DefaultEditor,
}

impl EditorLines {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, label: &str) -> Option<String> {
        match self.editor.readline(label) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        tracing::debug!(error = %err, "failed to record history");
                    }
                }
                Some(line)
            }
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read input");
                None
            }
        }
    }
}

/// Answers prompts from a `LineSource`.
///
/// An empty line takes the default (or the empty string without one).
/// Ctrl-D or Ctrl-C cancels.
pub struct TerminalPrompter<S> {
    lines: S,
}

impl<S: LineSource> TerminalPrompter<S> {
    pub fn new(lines: S) -> Self {
        Self { lines }
    }

    /// Read one line for the command loop.
    pub fn read_line(&mut self, label: &str) -> Option<String> {
        self.lines.read_line(label)
    }
}

impl<S: LineSource> Prompter for TerminalPrompter<S> {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        let label = match default {
            Some(default) => format!("{message} [{default}] "),
            None => format!("{message} "),
        };
        let answer = self.lines.read_line(&label)?;
        match default {
            Some(default) if answer.is_empty() => Some(default.to_string()),
            _ => Some(answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, Cursor};

    use super::*;

    /// Lines from an in-memory buffer; labels are collected instead of shown.
    struct BufferedLines {
        input: Cursor<Vec<u8>>,
        labels: Vec<String>,
    }

    impl LineSource for BufferedLines {
        fn read_line(&mut self, label: &str) -> Option<String> {
            self.labels.push(label.to_string());
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => None,
                Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            }
        }
    }

    fn prompter(input: &str) -> TerminalPrompter<BufferedLines> {
        TerminalPrompter::new(BufferedLines {
            input: Cursor::new(input.as_bytes().to_vec()),
            labels: Vec::new(),
        })
    }

    #[test]
    fn answer_is_read_without_newline() {
        let mut p = prompter("hello\r\n");
        assert_eq!(p.prompt("Enter post title:", None).as_deref(), Some("hello"));
        assert_eq!(p.lines.labels, vec!["Enter post title: "]);
    }

    #[test]
    fn empty_line_takes_default() {
        let mut p = prompter("\n");
        assert_eq!(p.prompt("Edit Post Title:", Some("old")).as_deref(), Some("old"));
        assert_eq!(p.lines.labels, vec!["Edit Post Title: [old] "]);
    }

    #[test]
    fn empty_line_without_default_is_empty() {
        let mut p = prompter("\n");
        assert_eq!(p.prompt("Enter post body:", None).as_deref(), Some(""));
    }

    #[test]
    fn end_of_input_cancels() {
        let mut p = prompter("");
        assert_eq!(p.prompt("Edit Post Body:", Some("old")), None);
    }

    #[test]
    fn lines_are_consumed_in_order() {
        let mut p = prompter("first\nsecond\n");
        assert_eq!(p.read_line("> ").as_deref(), Some("first"));
        assert_eq!(p.read_line("> ").as_deref(), Some("second"));
        assert_eq!(p.read_line("> "), None);
    }
}
