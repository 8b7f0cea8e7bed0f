//! Plain-text quote summary report

use crate::model::{JobSite, Material};
use crate::service::area_calculator::OptionSummary;

pub fn generate_quote_report(job_site: &JobSite) -> String {
    let summaries = job_site.summaries();

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("                 Job Site Quote                   \n");
    report.push_str("==================================================\n\n");
    report.push_str(&format!("  Address:   {}\n", job_site.address));
    report.push_str(&format!("  City:      {}\n", job_site.city));
    if let Some(notes) = job_site.notes.as_deref().filter(|n| !n.is_empty()) {
        report.push_str(&format!("  Notes:     {}\n", notes));
    }
    report.push_str(&format!("  Options:   {}\n\n", summaries.len()));

    if summaries.is_empty() {
        report.push_str("  No quote options recorded.\n");
        return report;
    }

    report.push_str(&summary_table(&summaries));
    report
}

const LABEL_WIDTH: usize = 14;
const COUNT_WIDTH: usize = 8;
const AREA_WIDTH: usize = 10;

/// Fixed-width table with one row per option
pub fn summary_table(summaries: &[OptionSummary]) -> String {
    let rule_width = LABEL_WIDTH
        + 1
        + COUNT_WIDTH
        + 1
        + AREA_WIDTH
        + Material::ALL.len() * (1 + AREA_WIDTH);

    let mut table = String::new();
    table.push_str(&format!(
        "{:<lw$} {:>cw$} {:>aw$}",
        "Option",
        "Sections",
        "Total m²",
        lw = LABEL_WIDTH,
        cw = COUNT_WIDTH,
        aw = AREA_WIDTH
    ));
    for material in Material::ALL {
        table.push_str(&format!(" {:>aw$}", material.label(), aw = AREA_WIDTH));
    }
    table.push('\n');
    table.push_str(&"-".repeat(rule_width));
    table.push('\n');

    for summary in summaries {
        table.push_str(&format!(
            "{:<lw$} {:>cw$} {:>aw$.2}",
            truncate_str(&summary.label, LABEL_WIDTH - 1),
            summary.section_count,
            summary.total_area,
            lw = LABEL_WIDTH,
            cw = COUNT_WIDTH,
            aw = AREA_WIDTH
        ));
        for material in Material::ALL {
            table.push_str(&format!(" {:>aw$.2}", summary.material(material), aw = AREA_WIDTH));
        }
        table.push('\n');
    }
    table
}

fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
