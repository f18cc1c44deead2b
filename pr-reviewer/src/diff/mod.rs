//! Unified-diff parsing into position-addressable chunks.
//!
//! A provider patch (GitHub `files[].patch`) is split into `@@`-delimited
//! chunks. Each chunk carries a mapping from new-file line numbers to
//! 1-based diff positions inside the chunk body, which is what the inline
//! review-comment API anchors on.
//!
//! Position convention, held everywhere in this crate: the hunk header is
//! not a position; the first body line is position 1; every body line
//! (added, removed, context) consumes a position; only lines that exist in
//! the new file (added and context) are mapped.

pub mod resolve;

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Hunk header, e.g. `@@ -12,7 +12,9 @@`; capture 1 is the new-file start.
    static ref HUNK_HEADER: Regex =
        Regex::new(r"@@ -\d+,?\d* \+(\d+),?\d* @@").expect("hunk header regex");
}

/// One `@@`-delimited hunk of a unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffChunk {
    /// First new-file line covered by the hunk; `0` when the header is
    /// malformed or absent (degenerate chunk, no mapping available).
    pub new_start: u32,
    /// Raw hunk text including the header line, line-terminated.
    pub content: String,
    /// New-file line number → 1-based diff position within the hunk body.
    /// Empty for degenerate chunks.
    pub line_mapping: BTreeMap<u32, u32>,
}

impl DiffChunk {
    fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The parsed form of one file's patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffInfo {
    /// Chunks in order of appearance in the patch.
    pub chunks: Vec<DiffChunk>,
}

impl DiffInfo {
    /// Parses a raw unified-diff string.
    ///
    /// A line starting with `@@` flushes the current chunk and opens a new
    /// one; a header that does not match the hunk pattern still opens a
    /// chunk, but a degenerate one (`new_start = 0`). Lines seen before the
    /// first header accumulate into a leading degenerate chunk, so a patch
    /// without any header yields exactly one unmapped chunk. Malformed
    /// input is never an error.
    pub fn parse(patch: &str) -> DiffInfo {
        let mut chunks: Vec<DiffChunk> = Vec::new();
        let mut current = DiffChunk::default();
        // Next new-file line number and last assigned diff position.
        let mut new_line = 0u32;
        let mut position = 0u32;

        for line in patch.lines() {
            if line.starts_with("@@") {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                let new_start = HUNK_HEADER
                    .captures(line)
                    .and_then(|c| c[1].parse().ok())
                    .unwrap_or(0);
                current.new_start = new_start;
                current.content.push_str(line);
                current.content.push('\n');
                new_line = new_start;
                position = 0;
                continue;
            }

            current.content.push_str(line);
            current.content.push('\n');

            if current.new_start == 0 {
                // Degenerate chunk: no reliable line counter to seed from.
                continue;
            }

            position += 1;
            // `++` marks the diff's own file-header decoration and `-` a
            // removed line; both consume a position but no new-file slot.
            if line.starts_with("++") || line.starts_with('-') {
                continue;
            }
            current.line_mapping.insert(new_line, position);
            new_line += 1;
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        DiffInfo { chunks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hunks_in_source_order() {
        let patch = "@@ -1,2 +1,3 @@\n line1\n+line2\n line3\n\
                     @@ -10,2 +11,2 @@\n line11\n-old\n+line12\n";
        let diff = DiffInfo::parse(patch);
        assert_eq!(diff.chunks.len(), 2);
        assert_eq!(diff.chunks[0].new_start, 1);
        assert_eq!(diff.chunks[1].new_start, 11);
        assert!(diff.chunks[0].content.starts_with("@@ -1,2 +1,3 @@\n"));
    }

    #[test]
    fn maps_lines_skipping_removed_positions() {
        let patch = "@@ -1,3 +1,4 @@\n line1\n+line2\n line3\n-oldline\n line4\n";
        let diff = DiffInfo::parse(patch);
        assert_eq!(diff.chunks.len(), 1);
        let mapping = &diff.chunks[0].line_mapping;
        // The removed line consumes position 4 but no new-file slot.
        let expected: Vec<(u32, u32)> = vec![(1, 1), (2, 2), (3, 3), (4, 5)];
        let got: Vec<(u32, u32)> = mapping.iter().map(|(&l, &p)| (l, p)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn header_decoration_consumes_position_but_is_never_mapped() {
        let patch = "@@ -1,1 +1,2 @@\n++ decoration\n+added\n context\n";
        let diff = DiffInfo::parse(patch);
        let mapping = &diff.chunks[0].line_mapping;
        assert_eq!(mapping.get(&1), Some(&2));
        assert_eq!(mapping.get(&2), Some(&3));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn patch_without_headers_yields_single_degenerate_chunk() {
        let patch = "just some text\nno hunk headers here\n";
        let diff = DiffInfo::parse(patch);
        assert_eq!(diff.chunks.len(), 1);
        assert_eq!(diff.chunks[0].new_start, 0);
        assert!(diff.chunks[0].line_mapping.is_empty());
    }

    #[test]
    fn malformed_header_opens_degenerate_chunk() {
        let patch = "@@ not a real header @@\n+something\n";
        let diff = DiffInfo::parse(patch);
        assert_eq!(diff.chunks.len(), 1);
        assert_eq!(diff.chunks[0].new_start, 0);
        assert!(diff.chunks[0].line_mapping.is_empty());
    }

    #[test]
    fn empty_patch_yields_no_chunks() {
        assert!(DiffInfo::parse("").chunks.is_empty());
    }

    #[test]
    fn header_without_lengths_still_parses() {
        let patch = "@@ -1 +1 @@\n-old\n+new\n";
        let diff = DiffInfo::parse(patch);
        assert_eq!(diff.chunks[0].new_start, 1);
        assert_eq!(diff.chunks[0].line_mapping.get(&1), Some(&2));
    }
}
