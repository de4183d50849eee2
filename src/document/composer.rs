//! Document composition - month groups → an in-memory block tree
//!
//! The tree is a plain value; rendering to `.docx` happens in the writer.

use crate::types::{MonthGroup, Record, DATE_TIME_FORMAT};

/// Separator between paragraphs inside one data cell.
pub const PARAGRAPH_DELIMITER: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Month section ("Heading 1")
    Month,
    /// Person / record ("Heading 2")
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    TableOfContents,
    Heading { level: HeadingLevel, text: String },
    /// Empty paragraph
    Spacer,
    Paragraph(Vec<TextRun>),
    PageBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    /// Text of every heading at `level`, in document order.
    pub fn headings(&self, level: HeadingLevel) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Build the report document for already ordered month groups.
pub fn compose(groups: &[MonthGroup]) -> Document {
    let mut blocks = vec![Block::TableOfContents];

    for group in groups {
        blocks.push(Block::Heading {
            level: HeadingLevel::Month,
            text: group.label.clone(),
        });
        blocks.push(Block::PageBreak);

        for record in &group.records {
            push_record(&mut blocks, record);
        }
    }

    Document { blocks }
}

fn push_record(blocks: &mut Vec<Block>, record: &Record) {
    blocks.push(Block::Spacer);
    blocks.push(Block::Heading {
        level: HeadingLevel::Record,
        text: record.name().to_string(),
    });

    let date = record.date().format(DATE_TIME_FORMAT).to_string();
    push_body(blocks, &date, false);
    for value in record.info() {
        push_body(blocks, &value.to_string(), true);
    }

    blocks.push(Block::PageBreak);
}

/// Split a cell on [`PARAGRAPH_DELIMITER`]; optionally bold the first
/// sentence of the first paragraph.
fn push_body(blocks: &mut Vec<Block>, text: &str, emphasize_first_sentence: bool) {
    for (idx, part) in text.split(PARAGRAPH_DELIMITER).enumerate() {
        let runs = if idx == 0 && emphasize_first_sentence {
            emphasized_runs(part)
        } else {
            vec![TextRun::plain(part)]
        };
        blocks.push(Block::Paragraph(runs));
    }
}

fn emphasized_runs(text: &str) -> Vec<TextRun> {
    match text.find('.') {
        Some(pos) => {
            let (head, tail) = text.split_at(pos + 1);
            let mut runs = vec![TextRun::bold(head)];
            if !tail.is_empty() {
                runs.push(TextRun::plain(tail));
            }
            runs
        }
        None => vec![TextRun::plain(text)],
    }
}
