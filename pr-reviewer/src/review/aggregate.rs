//! Grouping and rendering of findings into comment bodies.
//!
//! One comment is posted per resolved anchor line; inside a comment the
//! rendering order is a contract reviewers rely on for triage: category
//! groups alphabetically, findings within a group ranked HIGH, MEDIUM,
//! LOW, then everything else, ties keeping input order.

use std::collections::BTreeMap;

use crate::diff::resolve::ResolvedLine;
use crate::review::findings::Finding;

/// One comment body ready to post at a resolved diff position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedComment {
    /// Repo-relative path of the target file.
    pub path: String,
    /// 1-based diff position inside the matched hunk body.
    pub position: u32,
    /// Rendered comment body.
    pub body: String,
    /// Hunk window attached for reviewer orientation.
    pub diff_context: String,
}

/// Groups resolved findings by their anchor line (ascending), rendering one
/// comment per line. BTreeMap iteration is what makes the per-file posting
/// order deterministic.
pub fn plan_comments(path: &str, located: Vec<(ResolvedLine, Finding)>) -> Vec<PlannedComment> {
    let mut groups: BTreeMap<u32, (ResolvedLine, Vec<Finding>)> = BTreeMap::new();
    for (resolved, finding) in located {
        groups
            .entry(resolved.line)
            .or_insert_with(|| (resolved, Vec::new()))
            .1
            .push(finding);
    }

    groups
        .into_values()
        .map(|(resolved, findings)| PlannedComment {
            path: path.to_string(),
            position: resolved.position,
            body: render_comment(&findings),
            diff_context: resolved.context,
        })
        .collect()
}

/// Renders one comment body for a set of findings at the same location.
pub fn render_comment(findings: &[Finding]) -> String {
    let mut by_category: BTreeMap<&str, Vec<&Finding>> = BTreeMap::new();
    for finding in findings {
        by_category
            .entry(finding.category.as_str())
            .or_default()
            .push(finding);
    }

    let mut out = String::new();
    for (category, mut group) in by_category {
        // Stable sort: equal severities keep input order.
        group.sort_by_key(|f| severity_rank(&f.severity));

        out.push_str("📝 **");
        out.push_str(category);
        out.push_str("**\n");
        for finding in group {
            out.push_str(&format!(
                "{} **{}**: {}\n",
                severity_glyph(&finding.severity),
                finding.severity,
                finding.message
            ));
        }
        out.push('\n');
    }

    out.trim_end().to_string()
}

fn severity_rank(severity: &str) -> u8 {
    match severity {
        "HIGH" => 0,
        "MEDIUM" => 1,
        "LOW" => 2,
        _ => 3,
    }
}

fn severity_glyph(severity: &str) -> &'static str {
    match severity {
        "HIGH" => "🔴",
        "MEDIUM" => "🟡",
        "LOW" => "🟢",
        _ => "ℹ️",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(category: &str, severity: &str, message: &str) -> Finding {
        Finding {
            file_name: "main.go".into(),
            line_number: 5,
            category: category.into(),
            severity: severity.into(),
            message: message.into(),
        }
    }

    #[test]
    fn categories_alphabetical_severities_ranked() {
        let findings = vec![
            finding("BUG", "HIGH", "m1"),
            finding("BUG", "LOW", "m2"),
            finding("SECURITY", "HIGH", "m3"),
        ];
        let body = render_comment(&findings);
        assert_eq!(
            body,
            "📝 **BUG**\n\
             🔴 **HIGH**: m1\n\
             🟢 **LOW**: m2\n\
             \n\
             📝 **SECURITY**\n\
             🔴 **HIGH**: m3"
        );
    }

    #[test]
    fn severity_order_overrides_input_order() {
        let findings = vec![
            finding("BUG", "LOW", "m2"),
            finding("BUG", "HIGH", "m1"),
            finding("BUG", "MEDIUM", "m3"),
        ];
        let body = render_comment(&findings);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[1], "🔴 **HIGH**: m1");
        assert_eq!(lines[2], "🟡 **MEDIUM**: m3");
        assert_eq!(lines[3], "🟢 **LOW**: m2");
    }

    #[test]
    fn unrecognized_severity_sorts_last_with_fallback_glyph() {
        let findings = vec![
            finding("BUG", "NIT", "m2"),
            finding("BUG", "LOW", "m1"),
        ];
        let body = render_comment(&findings);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[1], "🟢 **LOW**: m1");
        assert_eq!(lines[2], "ℹ️ **NIT**: m2");
    }

    #[test]
    fn rendering_is_idempotent() {
        let findings = vec![
            finding("SECURITY", "MEDIUM", "m1"),
            finding("BUG", "HIGH", "m2"),
        ];
        assert_eq!(render_comment(&findings), render_comment(&findings));
    }

    #[test]
    fn comments_come_out_in_ascending_line_order() {
        let resolved = |line: u32, position: u32| ResolvedLine {
            line,
            position,
            context: String::new(),
        };
        let located = vec![
            (resolved(20, 2), finding("BUG", "LOW", "later")),
            (resolved(4, 1), finding("BUG", "HIGH", "earlier")),
            (resolved(20, 2), finding("TEST", "LOW", "also later")),
        ];
        let planned = plan_comments("src/main.go", located);
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].position, 1);
        assert!(planned[0].body.contains("earlier"));
        assert_eq!(planned[1].position, 2);
        assert!(planned[1].body.contains("also later"));
    }
}
