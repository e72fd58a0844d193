use clap::Parser;
use rxform::cli::{handle_generate, handle_prompt, handle_serve, Cli, Commands};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "rxform=info,tower_http=info";

fn main() {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve {
            port,
            public_dir,
            model,
            escape_completion,
        } => handle_serve(port, public_dir, model, escape_completion),
        Commands::Prompt(patient) => handle_prompt(patient),
        Commands::Generate {
            patient,
            model,
            output,
            escape_completion,
        } => handle_generate(patient, model, output, escape_completion),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
