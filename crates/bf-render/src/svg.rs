//! Standalone SVG documents.

use crate::canvas::Canvas;

const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// Finish `canvas` as a standalone `.svg` file body.
pub fn svg_document(canvas: &Canvas) -> String {
    let body = canvas.finish_svg();
    let mut out = String::with_capacity(XML_PROLOG.len() + 1 + body.len());
    out.push_str(XML_PROLOG);
    out.push('\n');
    out.push_str(&body);
    out
}
