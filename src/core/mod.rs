//! Record extraction, collection and chronological grouping

pub mod collector;
pub mod extractor;
pub mod grouping;

pub use collector::{collect_all, DEFAULT_HEADER_ROWS};
pub use extractor::RowExtractor;
pub use grouping::{month_label, order_and_group, sort_records, UK_MONTHS};
