//! HTML page backend: the SVG figure embedded inline, a summary table, and
//! a download link carrying the SVG as a base64 data URI.

use askama::Template;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;

use crate::plots::bf::format_bf;
use crate::Result;

/// Numbers shown next to the figure.
#[derive(Debug, Clone)]
pub struct PageSummary {
    pub title: String,
    pub figure_id: String,
    pub var_name: String,
    pub ref_val: f64,
    pub bf10: f64,
    pub bf01: f64,
    pub prior_at_ref: f64,
    pub posterior_at_ref: f64,
}

#[derive(Template)]
#[template(path = "bfplot.html")]
struct BfPage<'a> {
    title: &'a str,
    figure_id: &'a str,
    var_name: &'a str,
    ref_val: String,
    bf10: String,
    bf01: String,
    prior_at_ref: String,
    posterior_at_ref: String,
    svg: &'a str,
    download_href: String,
    generated_at: String,
}

/// Render the page around an already finished `<svg>` element.
pub fn render_page(summary: &PageSummary, svg: &str, minify: bool) -> Result<String> {
    let page = BfPage {
        title: &summary.title,
        figure_id: &summary.figure_id,
        var_name: &summary.var_name,
        ref_val: summary.ref_val.to_string(),
        bf10: format_bf(summary.bf10),
        bf01: format_bf(summary.bf01),
        prior_at_ref: format!("{:.4}", summary.prior_at_ref),
        posterior_at_ref: format!("{:.4}", summary.posterior_at_ref),
        svg,
        download_href: format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg)),
        generated_at: Utc::now().to_rfc3339(),
    };
    let html = page.render()?;
    if !minify {
        return Ok(html);
    }
    let mut cfg = minify_html::Cfg::new();
    cfg.minify_css = true;
    let bytes = minify_html::minify(html.as_bytes(), &cfg);
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PageSummary {
        PageSummary {
            title: "Bayes factor for a <test>".to_string(),
            figure_id: "fig-20260101-000000-abcdef".to_string(),
            var_name: "a".to_string(),
            ref_val: 0.0,
            bf10: 3.7,
            bf01: 0.27,
            prior_at_ref: 0.4,
            posterior_at_ref: 0.108,
        }
    }

    #[test]
    fn page_embeds_svg_and_table() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let html = render_page(&summary(), svg, false).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(svg));
        assert!(html.contains("3.70"));
        assert!(html.contains("0.1080"));
        assert!(html.contains("data:image/svg+xml;base64,"));
        // Title is escaped, SVG is not
        assert!(html.contains("Bayes factor for a &lt;test&gt;"));
    }

    #[test]
    fn minified_page_is_smaller() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
        let full = render_page(&summary(), svg, false).unwrap();
        let small = render_page(&summary(), svg, true).unwrap();
        assert!(small.len() < full.len());
        assert!(small.contains("<svg"));
    }
}
