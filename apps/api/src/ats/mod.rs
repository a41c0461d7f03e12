//! ATS check: asks the generative model to score a resume against a job
//! description and hands back its report untouched.

pub mod handlers;
pub mod prompts;

use tracing::debug;

use crate::ats::prompts::build_ats_prompt;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;

/// Runs one ATS check and returns the model's report as-is.
///
/// The score inside the report is not validated here.
pub async fn run_ats_check(
    resume_text: &str,
    job_description: &str,
    llm: &dyn TextGenerator,
) -> Result<String, AppError> {
    let prompt = build_ats_prompt(resume_text, job_description);
    debug!(
        resume_chars = resume_text.len(),
        jd_chars = job_description.len(),
        "Running ATS check"
    );
    Ok(llm.generate(&prompt).await?)
}
