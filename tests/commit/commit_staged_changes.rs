use crate::common::command::{
    branch_commit_id, head_commit_id, init_repository_dir, run_twig_command, twig_add,
    twig_commit,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_prints_branch_and_short_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("3.txt"), "three".to_string()));
    twig_add(dir, "3.txt").assert().success();

    let output = twig_commit(dir, "Add three\nwith a body")
        .assert()
        .success()
        .get_output()
        .clone();

    let head = head_commit_id(dir);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("[master {}] Add three\n", &head[..7])
    );
}

#[rstest]
fn committed_content_is_independent_of_later_edits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "committed".to_string()));
    twig_add(dir, "1.txt").assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "edited after add".to_string()));
    twig_commit(dir, "Edit one").assert().success();

    write_file(FileSpec::new(dir.join("1.txt"), "edited after commit".to_string()));
    run_twig_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "committed");

    Ok(())
}

#[rstest]
fn commit_advances_only_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "other"]).assert().success();
    let before = branch_commit_id(dir, "master");

    write_file(FileSpec::new(dir.join("3.txt"), "three".to_string()));
    twig_add(dir, "3.txt").assert().success();
    twig_commit(dir, "Add three").assert().success();

    assert_ne!(branch_commit_id(dir, "master"), before);
    assert_eq!(branch_commit_id(dir, "other"), before);
}

#[rstest]
fn committed_removal_drops_file_from_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    twig_commit(dir, "Remove one").assert().success();

    run_twig_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .failure()
        .stderr(predicate::eq("File does not exist in that commit.\n"));
}
