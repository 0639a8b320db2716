//! Report Generator — renders a [`GapAnalysis`] into an in-memory PDF.
//!
//! Layout is deliberately simple: a title block, the target role, then one
//! labeled section per populated result key. Sections for absent or empty
//! keys are omitted entirely (no placeholder). The builtin Helvetica fonts
//! carry a single-byte repertoire, so all text is sanitized to Latin-1
//! before rendering; anything outside becomes `?`.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use thiserror::Error;
use tracing::debug;

use crate::analyzer::GapAnalysis;

const REPORT_TITLE: &str = "SkillBridge - AI Career Gap Report";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 7.0;

const TITLE_SIZE_PT: f32 = 14.0;
const HEADER_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 11.0;

/// Rough per-character advance for Helvetica, used for centering and line
/// wrapping. Not exact font metrics; a conservative average is enough here.
const AVG_CHAR_WIDTH_FACTOR: f32 = 0.5;
const PT_TO_MM: f32 = 0.352_778;

/// Characters per wrapped body line at [`BODY_SIZE_PT`] within the margins.
const WRAP_WIDTH_CHARS: usize = 90;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Derives the download filename for a report on `target_role`.
/// `"Cloud Architect"` becomes `SkillBridge_Cloud_Architect_Report.pdf`.
pub fn report_filename(target_role: &str) -> String {
    format!("SkillBridge_{}_Report.pdf", target_role.replace(' ', "_"))
}

/// Renders the analysis into a PDF byte buffer. The buffer is the only
/// artifact; nothing is written to disk or retained across interactions.
pub fn build_report(analysis: &GapAnalysis, target_role: &str) -> Result<Vec<u8>, RenderError> {
    let mut writer = ReportWriter::new(REPORT_TITLE)?;

    writer.centered_line(REPORT_TITLE, FontStyle::Bold, TITLE_SIZE_PT);
    writer.space(10.0);
    writer.line(
        &format!("Target Role: {target_role}"),
        FontStyle::Regular,
        HEADER_SIZE_PT,
    );
    writer.space(5.0);

    if let Some(skills) = non_empty(&analysis.missing_skills) {
        writer.section("Missing Skills:", skills, false);
    }
    if let Some(certs) = non_empty(&analysis.certifications) {
        writer.space(8.0);
        writer.section("Recommended Certifications:", certs, false);
    }
    if let Some(links) = non_empty(&analysis.learning_links) {
        writer.space(8.0);
        // Links routinely exceed the line width; wrap instead of clipping.
        writer.section("Learning Resources:", links, true);
    }

    let bytes = writer.finish()?;
    debug!("Rendered gap report: {} bytes", bytes.len());
    Ok(bytes)
}

fn non_empty(field: &Option<Vec<String>>) -> Option<&[String]> {
    field.as_deref().filter(|items| !items.is_empty())
}

#[derive(Clone, Copy)]
enum FontStyle {
    Regular,
    Bold,
}

/// Cursor-based line writer over a growing printpdf document. Tracks the
/// current baseline from the bottom edge and starts a fresh page on overflow.
struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y_mm: f32,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM,
        })
    }

    fn font(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    fn break_page_if_needed(&mut self) {
        if self.y_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
        }
    }

    fn line_at(&mut self, text: &str, style: FontStyle, size_pt: f32, x_mm: f32) {
        self.break_page_if_needed();
        let text = sanitize_latin1(text);
        self.layer
            .use_text(text, size_pt, Mm(x_mm), Mm(self.y_mm), self.font(style));
        self.y_mm -= LINE_HEIGHT_MM;
    }

    fn line(&mut self, text: &str, style: FontStyle, size_pt: f32) {
        self.line_at(text, style, size_pt, MARGIN_MM);
    }

    fn centered_line(&mut self, text: &str, style: FontStyle, size_pt: f32) {
        let est_width_mm = text.chars().count() as f32 * size_pt * AVG_CHAR_WIDTH_FACTOR * PT_TO_MM;
        let x_mm = ((PAGE_WIDTH_MM - est_width_mm) / 2.0).max(MARGIN_MM);
        self.line_at(text, style, size_pt, x_mm);
    }

    fn space(&mut self, mm: f32) {
        self.y_mm -= mm;
    }

    fn section(&mut self, label: &str, items: &[String], wrap: bool) {
        self.line(label, FontStyle::Bold, HEADER_SIZE_PT);
        for item in items {
            let bullet = format!(" - {item}");
            if wrap {
                for piece in wrap_line(&bullet, WRAP_WIDTH_CHARS) {
                    self.line(&piece, FontStyle::Regular, BODY_SIZE_PT);
                }
            } else {
                self.line(&bullet, FontStyle::Regular, BODY_SIZE_PT);
            }
        }
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

/// Replaces every character outside the Latin-1 repertoire with `?` so the
/// single-byte builtin font encoding never fails on exotic input.
fn sanitize_latin1(text: &str) -> String {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Splits `text` into pieces of at most `width` characters, breaking on
/// whitespace where possible and hard-splitting unbroken runs (URLs).
fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let remaining = chars.len() - start;
        if remaining <= width {
            pieces.push(chars[start..].iter().collect());
            break;
        }
        // Prefer the last whitespace inside the window; fall back to a hard split.
        let window_end = start + width;
        let split = chars[start..window_end]
            .iter()
            .rposition(|c| c.is_whitespace())
            .map(|p| start + p)
            .filter(|&p| p > start);
        match split {
            Some(at) => {
                pieces.push(chars[start..at].iter().collect());
                start = at + 1;
            }
            None => {
                pieces.push(chars[start..window_end].iter().collect());
                start = window_end;
            }
        }
    }
    pieces
}

#[cfg(test)]
pub mod test_support {
    use printpdf::{BuiltinFont, Mm, PdfDocument};

    /// Builds a minimal PDF with one page per entry in `page_texts`; an empty
    /// entry produces a page with no text at all.
    pub fn pdf_with_pages(page_texts: &[&str]) -> Vec<u8> {
        let (doc, first_page, first_layer) =
            PdfDocument::new("fixture", Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).unwrap();

        for (i, text) in page_texts.iter().enumerate() {
            let layer = if i == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };
            if !text.is_empty() {
                layer.use_text(*text, 12.0, Mm(20.0), Mm(270.0), &font);
            }
        }

        doc.save_to_bytes().unwrap()
    }
}
