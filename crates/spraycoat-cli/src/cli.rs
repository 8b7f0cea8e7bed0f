//! CLI definition using clap

use clap::{Parser, Subcommand};
use spraycoat_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spraycoat")]
#[command(author = "spraycoat")]
#[command(version)]
#[command(about = "Leads, job sites and quote options for a spray-seal contractor")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Record store directory. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage leads
    Lead {
        #[command(subcommand)]
        action: LeadCommand,
    },

    /// Manage job sites
    Jobsite {
        #[command(subcommand)]
        action: JobSiteCommand,
    },

    /// Work with quote drafts
    Quote {
        #[command(subcommand)]
        action: QuoteCommand,
    },

    /// Sign in
    Login {
        /// User identifier (e.g. email)
        user: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set record store directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set session inactivity timeout in minutes
        #[arg(long)]
        set_timeout: Option<i64>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum LeadCommand {
    /// Add a lead
    Add {
        #[arg(long)]
        first: String,

        #[arg(long)]
        last: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        email: String,

        /// How the lead got in touch (phone, email, referral, web-form, sms)
        #[arg(long, default_value = "phone")]
        inquiry: String,
    },

    /// List leads
    List {
        /// Only leads whose name contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show a lead and its job sites
    Show { id: String },

    /// Change fields of a lead
    Edit {
        id: String,

        #[arg(long)]
        first: Option<String>,

        #[arg(long)]
        last: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        inquiry: Option<String>,
    },

    /// Delete a lead and all of its job sites
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum JobSiteCommand {
    /// Create a job site for a lead
    New {
        /// Lead id
        #[arg(long)]
        lead: String,

        /// Street address (overrides the draft)
        #[arg(long)]
        address: Option<String>,

        /// City (overrides the draft)
        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Quote draft file (TOML or JSON) with the options and sections
        #[arg(long)]
        draft: Option<PathBuf>,
    },

    /// List job sites across leads
    List {
        #[arg(long)]
        lead: Option<String>,

        #[arg(long)]
        city: Option<String>,

        /// Text to look for in address, city or lead name
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show a job site with its option summaries
    Show { lead: String, id: String },

    /// Delete a job site
    Delete { lead: String, id: String },
}

#[derive(Subcommand)]
pub enum QuoteCommand {
    /// Summarize a draft without saving anything
    Preview {
        /// Quote draft file (TOML or JSON)
        draft: PathBuf,
    },
}
