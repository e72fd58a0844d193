use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::entity::Submission;

#[derive(Parser, Debug)]
#[command(name = "rxform")]
#[command(version, about = "Patient intake form that drafts editable prescriptions")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the intake web server
    Serve {
        /// Port to listen on
        #[arg(long, short = 'p', env = "PORT", default_value_t = crate::server::DEFAULT_PORT)]
        port: u16,

        /// Directory holding index.html and static assets
        #[arg(long, env = "RXFORM_PUBLIC_DIR", default_value = "public")]
        public_dir: PathBuf,

        #[command(flatten)]
        model: ModelArgs,

        /// Escape HTML in the completion instead of inserting it verbatim
        #[arg(long)]
        escape_completion: bool,
    },

    /// Print the prompt that would be sent for the given patient
    Prompt(PatientArgs),

    /// Generate a prescription page once, without starting the server
    Generate {
        #[command(flatten)]
        patient: PatientArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Write the page to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Escape HTML in the completion instead of inserting it verbatim
        #[arg(long)]
        escape_completion: bool,
    },
}

/// Overrides for the completion model. Unset values come from the
/// `GEMINI_*` environment variables or the built-in defaults.
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Model id (e.g. "gemini-1.5-flash")
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (no timeout when unset or 0)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub struct PatientArgs {
    /// Patient name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Patient age
    #[arg(long, default_value = "")]
    pub age: String,

    /// Patient gender
    #[arg(long, default_value = "")]
    pub gender: String,

    /// Patient address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub number: String,

    /// Symptoms
    #[arg(long, default_value = "")]
    pub disease: String,
}

impl From<PatientArgs> for Submission {
    fn from(args: PatientArgs) -> Self {
        Submission {
            name: args.name,
            age: args.age,
            gender: args.gender,
            address: args.address,
            number: args.number,
            disease: args.disease,
        }
    }
}
