//! Cleanup of model responses.

const MARKDOWN_FENCE: &str = "```markdown";
const FENCE: &str = "```";
const CPP_FENCE: &str = "```c++";

/// Remove a ```` ```markdown ```` wrapper around the whole response.
///
/// A README ends with its fenced "Result" block, so a trailing fence is only
/// the wrapper's when the fences inside the wrapper are unbalanced.
pub fn strip_code_fence(response: &str) -> &str {
    let Some(inner) = response.strip_prefix(MARKDOWN_FENCE) else {
        return response;
    };
    let inner = inner.trim_start();

    let fences = inner
        .lines()
        .filter(|line| line.trim_start().starts_with(FENCE))
        .count();
    if fences % 2 == 0 {
        return inner;
    }

    match inner.trim_end().strip_suffix(FENCE) {
        Some(body) => body.trim_end(),
        None => inner,
    }
}

/// The body of the last ```` ```c++ ```` block, trimmed.
pub fn extract_solution(response: &str) -> Option<&str> {
    let (_, after) = response.rsplit_once(CPP_FENCE)?;
    let body = after.split(FENCE).next().unwrap_or(after);
    Some(body.trim())
}
