//! Markdown rendering of a ranking.

use std::fmt::Write;

use crate::ranking::{Ranking, ScoringResult};

fn score_label(result: &ScoringResult) -> String {
    match result.score {
        Some(score) => format!("{score}%"),
        None => "unscored".to_string(),
    }
}

/// Renders the best match followed by every result in rank order.
pub fn render_report(job_title: Option<&str>, ranking: &Ranking) -> String {
    let mut out = String::new();

    match job_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => {
            let _ = writeln!(out, "# ATS Results: {title}\n");
        }
        None => out.push_str("# ATS Results\n\n"),
    }

    if ranking.results.is_empty() {
        out.push_str("No valid resumes processed.\n");
        return out;
    }

    out.push_str("## Best Matching Resume\n\n");
    match ranking.best() {
        Some(best) => {
            let _ = writeln!(
                out,
                "The best matching resume is **{}** with an ATS Match Score of **{}**.\n",
                best.filename,
                score_label(best)
            );
            out.push_str(
                "**Reason:** This resume has the highest alignment with the job description \
                 based on skills, experiences, and relevant keywords.\n\n",
            );
        }
        None => out.push_str("No resume produced a readable ATS Match Score.\n\n"),
    }

    out.push_str("---\n\n## Detailed ATS Results\n\n");
    for result in &ranking.results {
        let _ = writeln!(out, "### Resume: {}\n", result.filename);
        let _ = writeln!(out, "**ATS Match Score:** {}\n", score_label(result));
        let _ = writeln!(out, "{}\n", result.output.trim_end());
        out.push_str("---\n\n");
    }

    out
}
