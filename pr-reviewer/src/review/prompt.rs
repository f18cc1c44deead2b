//! Review prompt builder.
//!
//! The prompt fixes the line protocol the finding parser understands; keep
//! the two in sync when changing either side.

/// Builds the per-file review prompt from the file's base name and patch.
pub fn build_review_prompt(file_name: &str, patch: &str) -> String {
    format!(
        "You are an experienced code reviewer. Analyze the following code and provide constructive feedback.\n\
         \n\
         File being analyzed: {file_name}\n\
         Code to analyze:\n\
         {patch}\n\
         \n\
         Please analyze the following aspects in the modified lines:\n\
         1. Security issues\n\
         2. Performance\n\
         3. Code best practices\n\
         4. Potential bugs\n\
         5. Test suggestions\n\
         \n\
         Format your response as a list of comments, one per line, in the following format:\n\
         [FILE]:[LINE] [CATEGORY]: [SEVERITY] - [COMMENT]\n\
         \n\
         Where:\n\
         - FILE must be exactly '{file_name}'\n\
         - LINE must be the line number being commented (use only lines that appear in the diff)\n\
         - CATEGORY must be one of: SECURITY, PERFORMANCE, BEST_PRACTICES, BUG, TEST\n\
         - SEVERITY must be: HIGH, MEDIUM, LOW\n\
         \n\
         Important:\n\
         - Analyze ONLY the modified code that appears in the diff\n\
         - Use exactly the filename provided above\n\
         - Make only relevant and specific comments about the modified code\n\
         - Always indicate the exact line of code being commented\n\
         - If commenting on a code block, use the first line of the block\n\
         - Avoid generic comments or comments that don't point to a specific issue\n\
         - Provide practical suggestions on how to resolve the identified issue\n\
         \n\
         Provide only the comments, without additional text."
    )
}
