//! Domain services

pub mod area_calculator;
pub mod quote_report;

pub use area_calculator::{area_for, material_area, summarize, total_area, OptionSummary};
pub use quote_report::{generate_quote_report, summary_table};
