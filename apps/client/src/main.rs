mod api_client;
mod cli;
mod errors;
mod pdf;
mod ranking;
mod report;
mod scoring;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::pdf::PdfReader;
use crate::cli::{Cli, Commands, ScoreArgs};
use crate::ranking::rank_results;
use crate::report::render_report;
use crate::scoring::score_resumes;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ApiClient::new(&cli.api_base)?;
    info!(api = %cli.api_base, "Using resume-hunter API");

    match cli.command {
        Commands::Score(args) => run_score(&client, args).await,
        Commands::Clear => {
            let message = client
                .clear_store()
                .await
                .context("Error clearing Pinecone")?;
            println!("{message}");
            Ok(())
        }
    }
}

async fn run_score(client: &ApiClient, args: ScoreArgs) -> Result<()> {
    let job_description = match (args.job_description, &args.jd_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read job description from {}", path.display()))?,
        (None, None) => bail!("a job description is required"),
    };
    if job_description.trim().is_empty() {
        bail!("the job description is empty");
    }

    info!(resumes = args.resumes.len(), "Processing resumes");
    let results = score_resumes(client, &PdfReader, &job_description, &args.resumes).await;
    let ranking = rank_results(results);

    print!("{}", render_report(args.job_title.as_deref(), &ranking));
    Ok(())
}
