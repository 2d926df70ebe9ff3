use crate::common::command::{
    head_commit_id, init_repository_dir, run_twig_command, twig_add, twig_commit,
};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn diverge_on_one(dir: &Path, mine: Option<&str>, theirs: Option<&str>) {
    run_twig_command(dir, &["branch", "other"]).assert().success();

    apply_side(dir, mine, "Master edits one");
    run_twig_command(dir, &["checkout", "other"]).assert().success();
    apply_side(dir, theirs, "Other edits one");
    run_twig_command(dir, &["checkout", "master"]).assert().success();
}

fn apply_side(dir: &Path, content: Option<&str>, message: &str) {
    match content {
        Some(content) => {
            write_file(FileSpec::new(dir.join("1.txt"), content.to_string()));
            twig_add(dir, "1.txt").assert().success();
        }
        None => {
            run_twig_command(dir, &["rm", "1.txt"]).assert().success();
        }
    }
    twig_commit(dir, message).assert().success();
}

#[rstest]
fn conflicting_edits_are_marked_and_committed(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    diverge_on_one(dir, Some("mine"), Some("theirs"));
    let before = head_commit_id(dir);

    let output = run_twig_command(dir, &["merge", "other"]).output()?;

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "Encountered a merge conflict.\n");
    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\nmine=======\ntheirs>>>>>>>\n"
    );

    // the conflicted content is part of the merge commit
    assert_ne!(head_commit_id(dir), before);
    let status = stdout_of(&run_twig_command(dir, &["status"]).output()?);
    assert!(
        status.contains("=== Modifications Not Staged For Commit ===\n\n"),
        "{status}"
    );
    let log = stdout_of(&run_twig_command(dir, &["log"]).output()?);
    assert!(log.contains("Merged other into master.\n"), "{log}");

    Ok(())
}

#[rstest]
fn modify_delete_is_a_conflict(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    diverge_on_one(dir, Some("mine"), None);

    let output = run_twig_command(dir, &["merge", "other"]).output()?;

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "Encountered a merge conflict.\n");
    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\nmine=======\n>>>>>>>\n"
    );

    Ok(())
}

#[rstest]
fn identical_edits_on_both_sides_do_not_conflict(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    diverge_on_one(dir, Some("same"), Some("same"));

    let output = run_twig_command(dir, &["merge", "other"]).output()?;

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "");
    assert_eq!(read_file(&dir.join("1.txt")), "same");

    Ok(())
}
