use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Parser, Debug)]
#[command(version, about = "Rank resumes against a job description with an ATS-style check")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the resume-hunter API.
    #[arg(long, global = true, env = "RESUME_HUNTER_API", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score resume PDFs against a job description and print a ranked report
    Score(ScoreArgs),
    /// Remove every indexed job recommendation from the vector store
    Clear,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Job title, shown in the report header.
    #[arg(long)]
    pub job_title: Option<String>,

    /// Job description text.
    #[arg(long, conflicts_with = "jd_file", required_unless_present = "jd_file")]
    pub job_description: Option<String>,

    /// File holding the job description text.
    #[arg(long)]
    pub jd_file: Option<PathBuf>,

    /// Resume PDFs to score.
    #[arg(required = true)]
    pub resumes: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_with_inline_description() {
        let cli = Cli::try_parse_from([
            "resume-hunter",
            "score",
            "--job-title",
            "Data Scientist",
            "--job-description",
            "Python, SQL",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();

        let Commands::Score(args) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.job_title.as_deref(), Some("Data Scientist"));
        assert_eq!(args.job_description.as_deref(), Some("Python, SQL"));
        assert_eq!(args.resumes.len(), 2);
    }

    #[test]
    fn test_score_requires_a_description() {
        let result = Cli::try_parse_from(["resume-hunter", "score", "a.pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_requires_resumes() {
        let result = Cli::try_parse_from(["resume-hunter", "score", "--job-description", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_description_sources_conflict() {
        let result = Cli::try_parse_from([
            "resume-hunter",
            "score",
            "--job-description",
            "x",
            "--jd-file",
            "jd.txt",
            "a.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_clear_with_custom_api_base() {
        let cli = Cli::try_parse_from([
            "resume-hunter",
            "clear",
            "--api-base",
            "https://resumehunter.example.com",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Clear));
        assert_eq!(cli.api_base, "https://resumehunter.example.com");
    }
}
