use crate::span::Span;

/// A reader or decoder error with its source span.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: String, span: Span) -> Self {
        Self {
            message,
            span,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    fn report<'a>(
        &self,
        filename: &'a str,
        color: bool,
    ) -> ariadne::Report<'a, (&'a str, std::ops::Range<usize>)> {
        use ariadne::{Color, Config, Label, Report, ReportKind};

        let mut report = Report::build(ReportKind::Error, filename, self.span.start as usize)
            .with_config(Config::default().with_color(color))
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.range()))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            );

        for note in &self.notes {
            report = report.with_note(note);
        }

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report.finish()
    }

    /// Render the diagnostic to stderr using ariadne. Colored only on a terminal.
    pub fn render(&self, filename: &str, source: &str) -> std::io::Result<()> {
        use std::io::IsTerminal;

        self.report(filename, std::io::stderr().is_terminal())
            .eprint((filename, ariadne::Source::from(source)))
    }

    /// Render without colors into a string.
    pub fn render_to_string(&self, filename: &str, source: &str) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self
            .report(filename, false)
            .write((filename, ariadne::Source::from(source)), &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Render a list of diagnostics.
pub fn render_diagnostics(diagnostics: &[Diagnostic], filename: &str, source: &str) {
    for diag in diagnostics {
        if diag.render(filename, source).is_err() {
            eprintln!("error: {}", diag.message);
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let d = Diagnostic::error("unknown tag".to_string(), Span::new(10, 15));
        assert_eq!(d.message, "unknown tag");
        assert_eq!(d.span.start, 10);
        assert_eq!(d.span.end, 15);
        assert!(d.notes.is_empty());
        assert!(d.help.is_none());
    }

    #[test]
    fn test_chained_builders() {
        let d = Diagnostic::error("hint".to_string(), Span::new(0, 5))
            .with_note("note 1".to_string())
            .with_help("help text".to_string())
            .with_note("note 2".to_string());
        assert_eq!(d.notes, vec!["note 1", "note 2"]);
        assert_eq!(d.help.as_deref(), Some("help text"));
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::error("unbalanced `)`".to_string(), Span::dummy());
        assert_eq!(d.to_string(), "error: unbalanced `)`");
    }

    #[test]
    fn test_render_to_string_mentions_message_and_help() {
        let source = "(Add (Lit 1))\n";
        let d = Diagnostic::error("`Add` expects 2 children".to_string(), Span::new(0, 13))
            .with_help("add the missing operand".to_string());
        let out = d.render_to_string("input.sexpr", source);
        assert!(out.contains("`Add` expects 2 children"));
        assert!(out.contains("add the missing operand"));
        assert!(out.contains("input.sexpr"));
    }

    #[test]
    fn test_render_does_not_panic() {
        let source = "(Mul (Lit 1) (Lit 2))\n";
        let d = Diagnostic::error("unknown tag `Mul`".to_string(), Span::new(0, 21));
        render_diagnostics(&[d], "test.sexpr", source);
    }
}
