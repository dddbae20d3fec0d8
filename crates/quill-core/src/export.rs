//! Document export
//!
//! Turns a document's markdown source into a downloadable artifact:
//! - Markdown: the source as-is
//! - Text: the source as plain text
//! - HTML: a standalone page with the source in a `<pre>` block
//! - PDF: delegated to a [`PdfRenderer`] supplied by the host

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export format for documents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Markdown source
    Markdown,
    /// Plain text
    Text,
    /// Standalone HTML page
    Html,
    /// PDF, rendered by the host
    Pdf,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Text => "text/plain",
            ExportFormat::Html => "text/html",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A rendered export ready to be written or downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// The artifact as UTF-8 text, for the text-based formats.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No PDF renderer is available")]
    RendererUnavailable,

    #[error("Render failed: {0}")]
    Render(String),
}

/// Renders a markdown document to PDF bytes.
///
/// PDF output depends on the host (a print dialog, a headless browser, a
/// typesetting library), so the core only defines the seam.
pub trait PdfRenderer: Send + Sync {
    fn render_pdf(&self, title: &str, content: &str) -> Result<Vec<u8>, ExportError>;

    /// Whether the renderer can currently produce output
    fn is_available(&self) -> bool {
        true
    }
}

/// Export a document in `format`.
///
/// `renderer` is only consulted for [`ExportFormat::Pdf`].
pub fn export_document(
    format: ExportFormat,
    title: &str,
    content: &str,
    renderer: Option<&dyn PdfRenderer>,
) -> Result<ExportArtifact, ExportError> {
    let bytes = match format {
        ExportFormat::Markdown | ExportFormat::Text => content.as_bytes().to_vec(),
        ExportFormat::Html => html_page(title, content).into_bytes(),
        ExportFormat::Pdf => match renderer {
            Some(renderer) if renderer.is_available() => renderer.render_pdf(title, content)?,
            _ => return Err(ExportError::RendererUnavailable),
        },
    };

    tracing::debug!("Exported {:?} ({} bytes)", format, bytes.len());
    Ok(ExportArtifact {
        file_name: file_name(title, format),
        mime_type: format.mime_type(),
        bytes,
    })
}

/// `"{title}.{ext}"` with path separators replaced.
pub fn file_name(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c => c,
        })
        .collect();
    format!("{}.{}", stem, format.extension())
}

fn html_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, -apple-system, sans-serif; max-width: 800px; margin: 40px auto; padding: 0 20px; line-height: 1.6; }}
    pre {{ background: #f5f5f5; padding: 10px; border-radius: 4px; overflow-x: auto; }}
    code {{ background: #f5f5f5; padding: 2px 4px; border-radius: 2px; }}
  </style>
</head>
<body>
  <pre>{content}</pre>
</body>
</html>"#,
        title = escape_html(title),
        content = escape_html(content),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
