//! CLI command handlers

pub mod commands;

pub use commands::{
    parse_from_bound, parse_to_bound, report, sheets, structures_add, structures_list,
    structures_remove, ReportOptions, StructureSelection,
};
