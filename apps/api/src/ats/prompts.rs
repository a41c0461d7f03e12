// Prompt text for the ATS check. The scoring rules live here as instructions
// to the model; nothing enforces them on the reply.

/// Marker the model is told to put in front of the score.
pub const SCORE_MARKER: &str = "ATS Match Score";

/// Builds the ATS prompt with both texts embedded verbatim.
///
/// Built with `format!` rather than placeholder replacement so braces inside a
/// resume or job description are never mistaken for template slots.
pub fn build_ats_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"
You are an ATS (Applicant Tracking System) evaluation AI.

Your behavior rules:
- **{SCORE_MARKER} must be between 0 and 100 only.**
- Focus primarily on matching **skills, experiences, and keywords** from the Job Description (JD).
- If the JD **does NOT mention any experience requirement**, prefer candidates with **more overall experience** and award a slightly higher score.
- Never return an ATS score above 100%.

Compare the following Resume and Job Description:

- Resume:
{resume_text}

- Job Description:
{job_description}

**Your Task:**
1. Assign an **{SCORE_MARKER} (0-100)** based on the above rules.
2. Create a detailed table:

| Category | Matched Skills/Keywords | Missing Skills/Keywords | Comments |

Focus points:
- Skills and keywords alignment.
- Relevant experiences mentioned.
- If no experience is specified in JD, reward candidates with greater experience.

**Output format (strictly):**
1. {SCORE_MARKER}: __%
2. Table:
"#
    )
}
