use crate::common::command::{branch_commit_id, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let twig_path = repository_dir.path().canonicalize()?.join(".twig");

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Initialized empty Twig repository in"))
        .stdout(predicate::str::contains(twig_path.display().to_string()));

    assert!(twig_path.join("objects").join("blobs").is_dir());
    assert!(twig_path.join("objects").join("commits").is_dir());
    assert!(twig_path.join("index").is_file());
    assert_eq!(
        std::fs::read_to_string(twig_path.join("HEAD"))?.trim(),
        "ref: refs/heads/master"
    );

    // the root commit is recorded as a merge candidate from the start
    let root = branch_commit_id(repository_dir.path(), "master");
    assert_eq!(root.len(), 40);
    assert_eq!(
        std::fs::read_to_string(twig_path.join("ancestors"))?.trim(),
        root
    );

    Ok(())
}

#[rstest]
fn root_commit_is_identical_across_repositories() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    run_twig_command(first.path(), &["init"]).assert().success();
    run_twig_command(second.path(), &["init"]).assert().success();

    assert_eq!(
        branch_commit_id(first.path(), "master"),
        branch_commit_id(second.path(), "master")
    );

    Ok(())
}

#[rstest]
fn root_commit_is_logged_at_the_epoch(repository_dir: TempDir) {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date: Thu Jan 1 00:00:00 1970 +0000"))
        .stdout(predicate::str::contains("initial commit"));
}
