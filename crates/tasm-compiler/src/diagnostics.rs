//! Source-annotated rendering of assembler errors.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::error::AsmError;

/// Render `error` against `source`, pointing at the offending span.
///
/// Errors without a source location render as their plain message.
pub fn render(error: &AsmError, source: &str, path: Option<&str>) -> String {
    let AsmError::Syntax {
        span, error: cause, ..
    } = error
    else {
        return format!("error: {error}");
    };

    let message = cause.to_string();
    let mut snippet = Snippet::source(source).line_start(1).annotation(
        AnnotationKind::Primary
            .span(adjust_range(span.clone(), source.len()))
            .label(&message),
    );
    if let Some(path) = path {
        snippet = snippet.path(path);
    }

    let report = vec![Level::ERROR.primary_title(&message).element(snippet)];
    Renderer::plain().render(&report).to_string()
}

/// Widen empty spans to one byte so the caret has something to point at.
fn adjust_range(range: Range<usize>, limit: usize) -> Range<usize> {
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod diagnostics_tests;
