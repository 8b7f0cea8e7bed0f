//! Command handlers

use std::path::{Path, PathBuf};

use spraycoat_app::app::query_service::{self, JobSiteFilter};
use spraycoat_app::app::{AppContext, JobSiteForm, QuoteDraft};
use spraycoat_app::config::Config;
use spraycoat_app::repository::open_identity_provider;
use spraycoat_app::session::IdentityProvider;
use spraycoat_domain::model::{InquiryMethod, LeadUpdate, NewLead};
use spraycoat_domain::repository::{JobSiteRepository, LeadRepository};
use spraycoat_types::{OutputFormat, Result};
use tracing::debug;

use crate::cli::{Cli, Commands, JobSiteCommand, LeadCommand, QuoteCommand};
use crate::output::{
    output_job_site, output_job_sites, output_lead, output_leads, output_session,
    output_summaries,
};

pub fn execute(cli: Cli, mut config: Config) -> Result<()> {
    // Override from CLI args
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Lead { action } => cmd_lead(AppContext::open(config)?, action, output_format),

        Commands::Jobsite { action } => {
            cmd_jobsite(AppContext::open(config)?, action, output_format)
        }

        Commands::Quote {
            action: QuoteCommand::Preview { draft },
        } => cmd_quote_preview(&draft, output_format),

        Commands::Login { user } => {
            let session = open_identity_provider(&config)?.sign_in(&user)?;
            println!("Signed in as {}", session.user);
            Ok(())
        }

        Commands::Logout => {
            open_identity_provider(&config)?.sign_out()?;
            println!("Signed out");
            Ok(())
        }

        Commands::Whoami => {
            let state = open_identity_provider(&config)?.current_session()?;
            output_session(output_format, &state)
        }

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_timeout,
            reset,
        } => cmd_config(show, set_data_dir, set_output, set_timeout, reset),
    }
}

fn parse_inquiry(value: &str) -> Result<InquiryMethod> {
    value.parse()
}

fn cmd_lead(ctx: AppContext, action: LeadCommand, output_format: OutputFormat) -> Result<()> {
    match action {
        LeadCommand::Add {
            first,
            last,
            phone,
            email,
            inquiry,
        } => {
            let user = ctx.require_user()?;
            let lead = ctx.leads().create(NewLead {
                first_name: first,
                last_name: last,
                phone,
                email,
                inquiry_method: parse_inquiry(&inquiry)?,
            })?;
            debug!(%user, id = %lead.id, "lead added");
            if output_format == OutputFormat::Table {
                println!("Lead created: {}", lead.id);
            }
            output_lead(output_format, &lead, &[])
        }

        LeadCommand::List { search } => {
            let leads =
                query_service::search_leads(&ctx.leads(), search.as_deref().unwrap_or(""))?;
            output_leads(output_format, &leads)
        }

        LeadCommand::Show { id } => {
            let lead = query_service::get_lead(&ctx.leads(), &id)?;
            let job_sites = ctx.job_sites().find_for_lead(&lead.id)?;
            output_lead(output_format, &lead, &job_sites)
        }

        LeadCommand::Edit {
            id,
            first,
            last,
            phone,
            email,
            inquiry,
        } => {
            ctx.require_user()?;
            let update = LeadUpdate {
                first_name: first,
                last_name: last,
                phone,
                email,
                inquiry_method: inquiry.as_deref().map(parse_inquiry).transpose()?,
            };
            let lead = ctx.leads().update(&id, update)?;
            let job_sites = ctx.job_sites().find_for_lead(&lead.id)?;
            if output_format == OutputFormat::Table {
                println!("Lead updated");
            }
            output_lead(output_format, &lead, &job_sites)
        }

        LeadCommand::Delete { id } => {
            ctx.require_user()?;
            let lead = query_service::get_lead(&ctx.leads(), &id)?;
            ctx.leads().delete(&lead.id)?;
            println!("Deleted lead {} ({})", lead.full_name(), lead.id);
            Ok(())
        }
    }
}

fn cmd_jobsite(ctx: AppContext, action: JobSiteCommand, output_format: OutputFormat) -> Result<()> {
    match action {
        JobSiteCommand::New {
            lead,
            address,
            city,
            notes,
            draft,
        } => {
            ctx.require_user()?;
            let lead = query_service::get_lead(&ctx.leads(), &lead)?;

            let mut form = JobSiteForm::new(&lead.id);
            if let Some(ref path) = draft {
                form.apply_draft(&QuoteDraft::load(path)?)?;
            }
            if let Some(address) = address {
                form.address = address;
            }
            if let Some(city) = city {
                form.city = city;
            }
            if notes.is_some() {
                form.notes = notes;
            }

            let repo = ctx.job_sites();
            let id = form.submit(&repo)?;
            if output_format == OutputFormat::Table {
                println!("Job site created: {}\n", id);
            }
            let job_site = query_service::get_job_site(&repo, &lead.id, &id)?;
            output_job_site(output_format, &job_site)
        }

        JobSiteCommand::List { lead, city, search } => {
            let filter = JobSiteFilter {
                lead_id: lead,
                city,
                search,
            };
            let listings = query_service::list_job_sites(&ctx.job_sites(), &filter)?;
            output_job_sites(output_format, &listings)
        }

        JobSiteCommand::Show { lead, id } => {
            let job_site = query_service::get_job_site(&ctx.job_sites(), &lead, &id)?;
            output_job_site(output_format, &job_site)
        }

        JobSiteCommand::Delete { lead, id } => {
            ctx.require_user()?;
            let repo = ctx.job_sites();
            let job_site = query_service::get_job_site(&repo, &lead, &id)?;
            repo.delete(&lead, &id)?;
            println!("Deleted job site {} ({})", job_site.address, job_site.id);
            Ok(())
        }
    }
}

fn cmd_quote_preview(draft: &Path, output_format: OutputFormat) -> Result<()> {
    let options = QuoteDraft::load(draft)?.build()?;
    output_summaries(output_format, &options.summaries())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_timeout: Option<i64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(minutes) = set_timeout {
        config.session_timeout_minutes = minutes;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("\n{}", config);
    }

    Ok(())
}
