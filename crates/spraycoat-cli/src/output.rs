//! Output formatting module

use serde::Serialize;
use spraycoat_app::session::SessionState;
use spraycoat_domain::model::{JobSite, JobSiteListing, Lead};
use spraycoat_domain::service::{generate_quote_report, summary_table, OptionSummary};
use spraycoat_types::{OutputFormat, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fit(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub fn output_leads(output_format: OutputFormat, leads: &[Lead]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(leads);
    }

    println!("Leads");
    println!("=====");
    println!("Total: {}", leads.len());
    println!();

    if leads.is_empty() {
        println!("No leads found.");
        return Ok(());
    }

    println!(
        "{:<34} {:<24} {:<16} {:<28} {:<10}",
        "ID", "Name", "Phone", "Email", "Inquiry"
    );
    println!("{}", "-".repeat(116));
    for lead in leads {
        println!(
            "{:<34} {:<24} {:<16} {:<28} {:<10}",
            lead.id,
            fit(&lead.full_name(), 24),
            fit(&lead.phone, 16),
            fit(&lead.email, 28),
            lead.inquiry_method.label()
        );
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LeadDetail<'a> {
    #[serde(flatten)]
    lead: &'a Lead,
    job_sites: &'a [JobSite],
}

pub fn output_lead(output_format: OutputFormat, lead: &Lead, job_sites: &[JobSite]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&LeadDetail { lead, job_sites });
    }

    println!("\n{}", lead.full_name());
    println!("{}", "=".repeat(lead.full_name().chars().count()));
    println!("ID:       {}", lead.id);
    println!("Phone:    {}", lead.phone);
    println!("Email:    {}", lead.email);
    println!("Inquiry:  {}", lead.inquiry_method.label());
    if let Some(created) = lead.created_at {
        println!("Created:  {}", created.format("%Y-%m-%d %H:%M"));
    }

    println!("\nJob sites: {}", job_sites.len());
    for site in job_sites {
        println!(
            "  {}  {}, {}  ({} options)",
            site.id,
            site.address,
            site.city,
            site.options.len()
        );
    }
    Ok(())
}

pub fn output_job_sites(output_format: OutputFormat, listings: &[JobSiteListing]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(listings);
    }

    println!("Job Sites");
    println!("=========");
    println!("Total: {}", listings.len());
    println!();

    if listings.is_empty() {
        println!("No job sites found.");
        return Ok(());
    }

    println!(
        "{:<34} {:<30} {:<16} {:<24}",
        "ID", "Address", "City", "Lead"
    );
    println!("{}", "-".repeat(107));
    for listing in listings {
        println!(
            "{:<34} {:<30} {:<16} {:<24}",
            listing.id,
            fit(&listing.address, 30),
            fit(&listing.city, 16),
            fit(&listing.lead_name, 24)
        );
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobSiteDetail<'a> {
    #[serde(flatten)]
    job_site: &'a JobSite,
    summaries: Vec<OptionSummary>,
}

pub fn output_job_site(output_format: OutputFormat, job_site: &JobSite) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&JobSiteDetail {
            job_site,
            summaries: job_site.summaries(),
        });
    }
    print!("{}", generate_quote_report(job_site));
    Ok(())
}

pub fn output_summaries(output_format: OutputFormat, summaries: &[OptionSummary]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(summaries);
    }

    println!("Quote Preview");
    println!("=============");
    if summaries.is_empty() {
        println!("No quote options in draft.");
        return Ok(());
    }
    print!("{}", summary_table(summaries));
    Ok(())
}

pub fn output_session(output_format: OutputFormat, state: &SessionState) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(state);
    }
    match state.user_identifier {
        Some(ref user) if state.is_authenticated => println!("Signed in as {}", user),
        _ => println!("Not signed in"),
    }
    Ok(())
}
