//! Parsing of the model's line-oriented review protocol.
//!
//! The prompt asks for one finding per line:
//! `[FILE]:[LINE] [CATEGORY]: [SEVERITY] - [COMMENT]`
//! Models deviate, so parsing is tolerant: a line that does not yield all
//! five fields, or whose line number is not a positive integer, is dropped
//! silently and parsing continues with the next line.

use std::collections::HashSet;

/// One discrete observation extracted from the model output.
///
/// `category` and `severity` are kept as free text: the prompt requests a
/// closed set, but unrecognized values are preserved (they render with the
/// fallback glyph and sort last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file_name: String,
    pub line_number: u32,
    pub category: String,
    pub severity: String,
    pub message: String,
}

/// Parses raw model text into findings, deduplicated by
/// `(file, line, category, message)` with the first occurrence kept.
/// Severity is deliberately not part of the identity.
pub fn parse_findings(raw: &str) -> Vec<Finding> {
    let mut seen: HashSet<(String, u32, String, String)> = HashSet::new();
    let mut findings = Vec::new();

    for line in raw.lines() {
        let Some(finding) = parse_finding_line(line) else {
            continue;
        };
        let key = (
            finding.file_name.clone(),
            finding.line_number,
            finding.category.clone(),
            finding.message.clone(),
        );
        if seen.insert(key) {
            findings.push(finding);
        }
    }

    findings
}

fn parse_finding_line(line: &str) -> Option<Finding> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parts = split_tokens(trimmed, 5);
    if parts.len() < 5 {
        return None;
    }

    let line_number: u32 = parts[1].parse().ok().filter(|n| *n > 0)?;

    Some(Finding {
        file_name: parts[0].trim_matches(['[', ']']).to_string(),
        line_number,
        category: parts[2].to_string(),
        severity: parts[3].to_string(),
        message: parts[4].trim().to_string(),
    })
}

/// Splits into at most `limit` tokens on runs of space/colon/hyphen; the
/// final token is the remainder with leading separators stripped, so the
/// free-text message survives untouched.
fn split_tokens(s: &str, limit: usize) -> Vec<&str> {
    let is_sep = |c: char| c == ' ' || c == ':' || c == '-';
    let mut parts = Vec::with_capacity(limit);
    let mut rest = s;

    while parts.len() + 1 < limit {
        rest = rest.trim_start_matches(is_sep);
        if rest.is_empty() {
            break;
        }
        match rest.find(is_sep) {
            Some(idx) => {
                parts.push(&rest[..idx]);
                rest = &rest[idx..];
            }
            None => {
                parts.push(rest);
                rest = "";
                break;
            }
        }
    }

    let tail = rest.trim_start_matches(is_sep);
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_protocol_lines_and_drops_garbage() {
        let raw = "[main.go]:42 BUG: HIGH - null check missing\n\
                   garbage line\n\
                   [main.go]:7 TEST: LOW - add coverage";
        let findings = parse_findings(raw);
        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings[0],
            Finding {
                file_name: "main.go".into(),
                line_number: 42,
                category: "BUG".into(),
                severity: "HIGH".into(),
                message: "null check missing".into(),
            }
        );
        assert_eq!(findings[1].line_number, 7);
        assert_eq!(findings[1].category, "TEST");
    }

    #[test]
    fn message_keeps_inner_separators() {
        let raw = "[api.rs]:3 SECURITY: HIGH - sanitize input - see OWASP: A03";
        let findings = parse_findings(raw);
        assert_eq!(findings[0].message, "sanitize input - see OWASP: A03");
    }

    #[test]
    fn blank_and_short_lines_do_not_abort_parsing() {
        let raw = "\n\nonly three tokens\n[a.rs]:1 BUG: LOW - x\n";
        let findings = parse_findings(raw);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn non_positive_line_number_is_discarded() {
        assert!(parse_findings("[a.rs]:0 BUG: LOW - zero line").is_empty());
        assert!(parse_findings("[a.rs]:abc BUG: LOW - no line").is_empty());
    }

    #[test]
    fn duplicate_identity_keeps_first_occurrence() {
        // Same (file, line, category, message); only severity differs.
        let raw = "[a.go]:5 BUG: HIGH - X\n[a.go]:5 BUG: LOW - X\n";
        let findings = parse_findings(raw);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, "HIGH");
    }

    #[test]
    fn unrecognized_category_and_severity_are_preserved() {
        let findings = parse_findings("[a.rs]:9 STYLE: NIT - prefer iterators");
        assert_eq!(findings[0].category, "STYLE");
        assert_eq!(findings[0].severity, "NIT");
    }
}
