//! Score extraction and ranking of ATS reports.

/// Marker the API's prompt asks the model to put in front of the score.
pub const SCORE_MARKER: &str = "ATS Match Score";

/// Outcome of scoring one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub filename: String,
    /// `None` when the report carried no readable score.
    pub score: Option<u32>,
    /// Raw report text, or the error text when the check failed.
    pub output: String,
}

/// Reads the score from the first line mentioning [`SCORE_MARKER`].
///
/// Parenthesised text after the marker is a scale or an aside, never the
/// score, so it is dropped (`ATS Match Score (0-100): 85` reads 85). When a
/// `:` follows the marker, only the text after it is read. A number followed
/// by `%` wins over bare numbers; a single bare number, or one written as
/// `72/100`, is used as is. Several bare numbers are ambiguous and read as
/// `None`. Fractions are truncated and values above 100 are unreadable.
pub fn extract_score(report: &str) -> Option<u32> {
    let line = report.lines().find(|l| l.contains(SCORE_MARKER))?;
    let start = line.find(SCORE_MARKER)? + SCORE_MARKER.len();

    let tail = strip_parenthesised(&line[start..]);
    let value = match tail.find(':') {
        Some(colon) => &tail[colon + 1..],
        None => tail.as_str(),
    };
    let numbers = scan_numbers(value);

    let chosen = match numbers.iter().find(|n| n.percent) {
        Some(number) => number,
        None => match numbers.as_slice() {
            [only] => only,
            [first, ..] if first.out_of => first,
            _ => return None,
        },
    };

    let score: u32 = chosen.whole.parse().ok()?;
    (score <= 100).then_some(score)
}

/// `text` with every `(...)` group removed, nested groups included.
fn strip_parenthesised(text: &str) -> String {
    let mut depth = 0usize;
    text.chars()
        .filter(|&c| match c {
            '(' => {
                depth += 1;
                false
            }
            ')' if depth > 0 => {
                depth -= 1;
                false
            }
            _ => depth == 0,
        })
        .collect()
}

#[derive(Debug)]
struct ScannedNumber<'a> {
    /// Integer part.
    whole: &'a str,
    /// Followed by `%`.
    percent: bool,
    /// Followed by `/`, as in `72/100`.
    out_of: bool,
}

fn scan_numbers(text: &str) -> Vec<ScannedNumber<'_>> {
    let bytes = text.as_bytes();
    let mut numbers = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let begin = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let whole = &text[begin..i];

        if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }

        let mut j = i;
        while j < bytes.len() && bytes[j] == b' ' {
            j += 1;
        }
        let next = bytes.get(j).copied();

        numbers.push(ScannedNumber {
            whole,
            percent: next == Some(b'%'),
            out_of: next == Some(b'/'),
        });
    }

    numbers
}

/// Results ordered best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub results: Vec<ScoringResult>,
}

impl Ranking {
    /// The top result, if it carries a score.
    pub fn best(&self) -> Option<&ScoringResult> {
        self.results.first().filter(|r| r.score.is_some())
    }
}

/// Sorts by score, highest first. Scored resumes precede unscored ones, and
/// equal scores keep submission order.
pub fn rank_results(mut results: Vec<ScoringResult>) -> Ranking {
    results.sort_by(|a, b| b.score.cmp(&a.score));
    Ranking { results }
}
