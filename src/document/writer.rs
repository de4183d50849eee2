//! Report writer - [`Document`] → `.docx` on disk

use super::composer::{Block, Document, HeadingLevel, TextRun};
use crate::error::{ReportError, ReportResult};
use crate::types::WriteOutcome;
use docx_rs::{
    BreakType, Docx, LineSpacing, Paragraph, Run, RunFonts, SpecialIndentType, Style, StyleType,
    TableOfContents,
};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

const HEADING_FONT: &str = "Calibri Light";
const HEADING_COLOR: &str = "2F5496";
/// 16pt, in half-points
const HEADING_SIZE: usize = 32;
/// 12pt, in twips
const BODY_FIRST_LINE_INDENT: i32 = 240;

/// Render `document` into `.docx` bytes.
pub fn render_docx(document: &Document) -> ReportResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    build_docx(document)
        .build()
        .pack(&mut buffer)
        .map_err(|e| ReportError::Write(format!("Failed to build document: {}", e)))?;
    Ok(buffer.into_inner())
}

/// Persist `document` to `path` and report which rows were left out.
///
/// The file is written to a temporary sibling and moved into place, so a
/// failed write never leaves a truncated document behind.
pub fn write_report(
    document: &Document,
    path: &Path,
    failed_rows: &[usize],
) -> ReportResult<WriteOutcome> {
    let bytes = render_docx(document)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| ReportError::Write(format!("{}: {}", path.display(), e)))?;
    tmp.write_all(&bytes)
        .map_err(|e| ReportError::Write(format!("{}: {}", path.display(), e)))?;
    tmp.persist(path)
        .map_err(|e| ReportError::Write(format!("{}: {}", path.display(), e)))?;

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        failed_rows = failed_rows.len(),
        "report written"
    );

    Ok(WriteOutcome::from_failed_rows(failed_rows.to_vec()))
}

fn build_docx(document: &Document) -> Docx {
    let mut docx = Docx::new()
        .add_style(Style::new(heading_style_id(HeadingLevel::Month), StyleType::Paragraph).name("Heading 1"))
        .add_style(Style::new(heading_style_id(HeadingLevel::Record), StyleType::Paragraph).name("Heading 2"));

    for block in &document.blocks {
        docx = match block {
            Block::TableOfContents => {
                docx.add_table_of_contents(TableOfContents::new().heading_styles_range(1, 3))
            }
            Block::Heading { level, text } => docx.add_paragraph(heading(*level, text)),
            Block::Spacer => docx.add_paragraph(Paragraph::new().add_run(Run::new())),
            Block::Paragraph(runs) => docx.add_paragraph(body(runs)),
            Block::PageBreak => {
                docx.add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            }
        };
    }

    docx
}

/// Zero-based outline level picked up by the table of contents.
fn outline_level(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::Month => 0,
        HeadingLevel::Record => 1,
    }
}

fn heading_style_id(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::Month => "Heading1",
        HeadingLevel::Record => "Heading2",
    }
}

fn heading(level: HeadingLevel, text: &str) -> Paragraph {
    // before/after in twips
    let spacing = match level {
        HeadingLevel::Month => LineSpacing::new().before(240).after(120),
        HeadingLevel::Record => LineSpacing::new().before(120).after(0),
    };
    let fonts = RunFonts::new()
        .ascii(HEADING_FONT)
        .hi_ansi(HEADING_FONT)
        .cs(HEADING_FONT);

    Paragraph::new()
        .style(heading_style_id(level))
        .outline_lvl(outline_level(level))
        .line_spacing(spacing)
        .add_run(
            Run::new()
                .add_text(text)
                .size(HEADING_SIZE)
                .fonts(fonts)
                .color(HEADING_COLOR),
        )
}

fn body(runs: &[TextRun]) -> Paragraph {
    let paragraph = Paragraph::new()
        .indent(
            None,
            Some(SpecialIndentType::FirstLine(BODY_FIRST_LINE_INDENT)),
            None,
            None,
        )
        .line_spacing(LineSpacing::new().before(0).after(0));

    runs.iter().fold(paragraph, |paragraph, run| {
        let mut r = Run::new().add_text(&run.text);
        if run.bold {
            r = r.bold();
        }
        paragraph.add_run(r)
    })
}
