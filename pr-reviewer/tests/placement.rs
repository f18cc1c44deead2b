//! End-to-end placement: raw patch + raw model output → planned comments.
//!
//! Exercises the whole pure pipeline (patch parsing, line resolution with
//! fallback, finding parsing with dedup, grouping and rendering) the way
//! the orchestrator drives it, without network collaborators.

use pr_reviewer::review::plan_file_comments;

const PATCH: &str = "\
@@ -10,6 +10,7 @@
 fn handler() {
     let user = load_user();
+    let name = user.name.unwrap();
     respond(name)
 }

@@ -30,4 +31,5 @@
 fn teardown() {
     drop_tables();
+    // no auth check
 }
";

#[test]
fn full_pipeline_places_grouped_comments() {
    let model_output = "\
[handlers.rs]:12 BUG: HIGH - unwrap panics when the user has no name
[handlers.rs]:12 SECURITY: MEDIUM - user data flows to the response unescaped
garbage that models sometimes emit
[handlers.rs]:12 BUG: HIGH - unwrap panics when the user has no name
[handlers.rs]:33 SECURITY: HIGH - teardown runs without an auth check
";

    let planned = plan_file_comments("src/handlers.rs", "handlers.rs", PATCH, model_output);
    assert_eq!(planned.len(), 2);

    // Line 12 is the added line of the first hunk: body position 3.
    let first = &planned[0];
    assert_eq!(first.path, "src/handlers.rs");
    assert_eq!(first.position, 3);
    // The duplicate BUG finding collapsed; both categories render,
    // alphabetically, severity-ranked inside.
    assert_eq!(
        first.body,
        "📝 **BUG**\n\
         🔴 **HIGH**: unwrap panics when the user has no name\n\
         \n\
         📝 **SECURITY**\n\
         🟡 **MEDIUM**: user data flows to the response unescaped"
    );
    assert!(first.diff_context.starts_with("@@ -10,6 +10,7 @@"));
    assert!(first.diff_context.contains("+    let name = user.name.unwrap();"));

    // Line 33 is the added line of the second hunk: body position 3.
    let second = &planned[1];
    assert_eq!(second.position, 3);
    assert!(second.body.contains("teardown runs without an auth check"));
    assert!(second.diff_context.starts_with("@@ -30,4 +31,5 @@"));
}

#[test]
fn off_by_a_few_model_line_snaps_to_nearest_mapped_line() {
    // Line 16 falls in the gap between the hunks; the nearest mapped line
    // (15, the first hunk's trailing context) wins over anything in the
    // second hunk.
    let model_output = "[handlers.rs]:16 BUG: MEDIUM - stale reference\n";
    let planned = plan_file_comments("src/handlers.rs", "handlers.rs", PATCH, model_output);
    assert_eq!(planned.len(), 1);
    assert!(planned[0].body.contains("stale reference"));
}

#[test]
fn rerunning_the_planner_is_byte_identical() {
    let model_output = "\
[handlers.rs]:12 SECURITY: HIGH - m3
[handlers.rs]:12 BUG: LOW - m2
[handlers.rs]:12 BUG: HIGH - m1
";
    let a = plan_file_comments("src/handlers.rs", "handlers.rs", PATCH, model_output);
    let b = plan_file_comments("src/handlers.rs", "handlers.rs", PATCH, model_output);
    assert_eq!(a, b);
    assert_eq!(
        a[0].body,
        "📝 **BUG**\n\
         🔴 **HIGH**: m1\n\
         🟢 **LOW**: m2\n\
         \n\
         📝 **SECURITY**\n\
         🔴 **HIGH**: m3"
    );
}
