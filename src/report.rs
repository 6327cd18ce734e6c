// File: src/report.rs
//! The pre-generated analysis report, shown verbatim.

use crate::error::ReportError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_FILE: &str = "Delhi_Rent_insights.html";

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub path: PathBuf,
    pub html: String,
}

impl Report {
    /// Readable text for a terminal: tags dropped, `<script>`/`<style>`
    /// bodies skipped, common entities decoded, blank lines collapsed.
    pub fn plain_text(&self) -> String {
        let mut text = String::with_capacity(self.html.len() / 2);
        let mut rest = self.html.as_str();

        while let Some(open) = rest.find('<') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('>') else {
                rest = "";
                break;
            };
            let tag = after[..close].trim().to_ascii_lowercase();
            rest = &after[close + 1..];

            let name = tag_name(&tag);
            for hidden in ["script", "style"] {
                if !tag.starts_with('/') && name == hidden {
                    let end = format!("</{hidden}");
                    rest = match rest.to_ascii_lowercase().find(&end) {
                        Some(idx) => &rest[idx..],
                        None => "",
                    };
                }
            }
            if is_block(&tag) {
                text.push('\n');
            } else if is_cell(&tag) {
                text.push(' ');
            }
        }
        text.push_str(rest);

        let decoded = decode_entities(&text);
        let mut out = String::new();
        for line in decoded.lines().map(str::trim).filter(|l| !l.is_empty()) {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Element name of a tag body, without the closing slash or attributes.
fn tag_name(tag: &str) -> &str {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag_name(tag),
        "br" | "p" | "div" | "tr" | "li" | "h1" | "h2" | "h3" | "h4" | "table" | "section"
    )
}

fn is_cell(tag: &str) -> bool {
    !tag.starts_with('/') && matches!(tag_name(tag), "td" | "th")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Reads the report file. Absence is a distinct, user-facing error.
pub fn load_report(path: &Path) -> Result<Report, ReportError> {
    match fs::read_to_string(path) {
        Ok(html) => {
            tracing::debug!(path = %path.display(), bytes = html.len(), "report loaded");
            Ok(Report {
                path: path.to_path_buf(),
                html,
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(ReportError::Missing {
            file: path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }),
        Err(source) => Err(ReportError::Unreadable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_report_is_a_clear_message() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_report(&dir.path().join(DEFAULT_REPORT_FILE)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Report file not found. Please ensure 'Delhi_Rent_insights.html' is in the artifact directory."
        );
    }

    #[test]
    fn report_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.html");
        let html = "<html><body><h1>Rent</h1>\n<p>₹ by suburb</p></body></html>";
        fs::write(&path, html).unwrap();
        assert_eq!(load_report(&path).unwrap().html, html);
    }

    #[test]
    fn plain_text_drops_markup() {
        let report = Report {
            path: PathBuf::from("r.html"),
            html: "<html><head><style>h1 { color: red; }</style>\
                   <script type=\"text/javascript\">var x = 1 < 2;</script></head>\
                   <body><h1>Delhi Rent</h1><p>South &amp; West lead</p>\
                   <table><tr><td>Saket</td><td>41,000</td></tr></table></body></html>"
                .into(),
        };
        assert_eq!(report.plain_text(), "Delhi Rent\nSouth & West lead\nSaket 41,000\n");
    }

    #[test]
    fn script_tag_with_attributes_on_new_line_is_hidden() {
        let report = Report {
            path: PathBuf::from("r.html"),
            html: "<body><script\ntype=\"text/javascript\">alert('x');</script>\
                   <STYLE\tmedia=\"all\">p { margin: 0 }</STYLE><p>Median rent</p></body>"
                .into(),
        };
        assert_eq!(report.plain_text(), "Median rent\n");
    }
}
