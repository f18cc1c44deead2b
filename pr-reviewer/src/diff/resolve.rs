//! Line-address resolution: new-file line number → diff position.
//!
//! Model output refers to absolute new-file line numbers; the review-comment
//! API wants diff positions. The primary path is an exact mapping hit; the
//! fallback snaps to the nearest mapped line, because model line numbers are
//! occasionally off by a few and silently dropping the finding would be
//! worse than anchoring it one line away.

use crate::diff::{DiffChunk, DiffInfo};

/// Hunk-body lines included on each side of the anchor position.
const CONTEXT_LINES: u32 = 3;

/// A finding's target line resolved against a parsed diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLine {
    /// The mapped new-file line the resolution anchored on (equals the
    /// target on an exact hit, the nearest mapped line otherwise).
    pub line: u32,
    /// 1-based diff position inside the matched hunk body.
    pub position: u32,
    /// Hunk header plus a clipped window of body lines around the position.
    pub context: String,
}

/// Resolves `target_line` to a diff position.
///
/// Searches chunks in source order for an exact mapping hit; otherwise
/// scans the union of all mappings for the line with minimum absolute
/// distance to the target (strict `<`, so ties keep the first-encountered
/// candidate). Returns `None` only when no chunk has any mapping.
pub fn resolve_line(diff: &DiffInfo, target_line: u32) -> Option<ResolvedLine> {
    for chunk in &diff.chunks {
        if let Some(&position) = chunk.line_mapping.get(&target_line) {
            return Some(ResolvedLine {
                line: target_line,
                position,
                context: context_window(chunk, position),
            });
        }
    }

    let mut best: Option<(u32, u32, u32, &DiffChunk)> = None;
    for chunk in &diff.chunks {
        for (&line, &position) in &chunk.line_mapping {
            let distance = line.abs_diff(target_line);
            if best.map_or(true, |(d, _, _, _)| distance < d) {
                best = Some((distance, line, position, chunk));
            }
        }
    }

    best.map(|(_, line, position, chunk)| ResolvedLine {
        line,
        position,
        context: context_window(chunk, position),
    })
}

/// Builds the context window for a position: the hunk header first, then
/// body lines `[position - CONTEXT_LINES, position + CONTEXT_LINES]`
/// clipped to the body bounds.
fn context_window(chunk: &DiffChunk, position: u32) -> String {
    let lines: Vec<&str> = chunk.content.lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    // lines[0] is the hunk header; the body line at position p is lines[p].
    let last = (lines.len() - 1) as u32;
    let start = position.saturating_sub(CONTEXT_LINES).max(1);
    let end = (position + CONTEXT_LINES).min(last);

    let mut window = Vec::with_capacity((end - start + 2) as usize);
    window.push(lines[0]);
    for i in start..=end {
        window.push(lines[i as usize]);
    }
    window.join("\n")
}
