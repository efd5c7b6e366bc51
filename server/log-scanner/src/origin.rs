//! Origin error extraction (HTTP 503 lines).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::split_lines;

/// `503` not glued to other digits: matches `status=503;`, `c503d`, `503` alone,
/// but not `15030` or `5031`.
static STANDALONE_503: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?:^|[^0-9])503(?:[^0-9]|$)").expect("static regex is valid"));

/// True when a line reports an origin 503.
pub fn is_origin_error(line: &str) -> bool {
  line.contains(" 503 ") || STANDALONE_503.is_match(line)
}

/// Every line mentioning a 503, in original order.
pub fn parse_origin_errors(log_content: &str) -> Vec<String> {
  split_lines(log_content)
    .into_iter()
    .filter(|line| is_origin_error(line))
    .map(str::to_string)
    .collect()
}
