use once_cell::sync::Lazy;
use regex::Regex;

/// Category prefixes that `sanitize` accepts without re-prefixing.
const CATEGORY_PREFIXES: [&str; 5] = ["feature/", "bugfix/", "fix/", "chore/", "refactor/"];

/// Hard cap on sanitized branch length, in bytes.
pub const MAX_BRANCH_LEN: usize = 120;

static INVALID_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9/-]+").unwrap());
static DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());
static SLASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/+").unwrap());
static NON_ALNUM_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

// Candidates the external naming tool may emit; docs/ and test/ are
// recognized here but re-prefixed under feature/ by sanitize.
static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(feature|bugfix|fix|chore|refactor|docs|test)/[a-z0-9][a-z0-9/-]{1,120}\b")
        .unwrap()
});

/// Normalize arbitrary text into a valid, prefixed, length-bounded git
/// branch name. Returns an empty string when nothing usable remains;
/// callers must treat that as a hard failure.
pub fn sanitize(raw: &str) -> String {
    let s = raw.trim().to_lowercase();
    let s = INVALID_RUN.replace_all(&s, "-");
    let s = DASH_RUN.replace_all(&s, "-");
    let s = SLASH_RUN.replace_all(&s, "/");
    let s = s.trim_matches('-');
    let s = s.trim_matches('/');
    if s.is_empty() {
        return String::new();
    }

    let mut branch = if CATEGORY_PREFIXES.iter().any(|p| s.starts_with(p)) {
        s.to_string()
    } else {
        format!("feature/{}", s)
    };
    if branch.len() > MAX_BRANCH_LEN {
        branch.truncate(MAX_BRANCH_LEN);
        branch = branch.trim_end_matches(['-', '/']).to_string();
    }
    branch
}

/// Deterministic slug of the task text, used when the naming tool is
/// unavailable or produced nothing usable. Never empty.
pub fn fallback_slug(task: &str) -> String {
    let lowered = task.to_lowercase();
    let slug = NON_ALNUM_RUN.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "task".to_string()
    } else {
        slug.to_string()
    }
}

/// Scan captured naming-tool output for a branch candidate.
///
/// Prefers the last category-prefixed token in the output; failing that,
/// walks whitespace-delimited tokens from the end, stripping surrounding
/// punctuation. Returns an empty string when no token survives sanitize.
pub fn extract_candidate(output: &str) -> String {
    let text = output.replace('\r', "\n").to_lowercase();

    let matches: Vec<&str> = CANDIDATE.find_iter(&text).map(|m| m.as_str()).collect();
    for m in matches.iter().rev() {
        let v = sanitize(m);
        if !v.is_empty() && v.len() <= MAX_BRANCH_LEN {
            return v;
        }
    }

    for token in text.split_whitespace().rev() {
        let token = token.trim_matches(|c| "\"'`.,:;[](){}<>".contains(c));
        let v = sanitize(token);
        if !v.is_empty() && v.len() <= MAX_BRANCH_LEN {
            return v;
        }
    }
    String::new()
}

#[cfg(test)]
#[path = "branch_tests.rs"]
mod tests;
