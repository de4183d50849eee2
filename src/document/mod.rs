//! Report document: composition and `.docx` output

mod composer;
mod writer;

pub use composer::{compose, Block, Document, HeadingLevel, TextRun, PARAGRAPH_DELIMITER};
pub use writer::{render_docx, write_report};
