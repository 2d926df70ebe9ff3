use crate::common::command::{branch_commit_id, head_commit_id, init_repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("feature")]
#[case("feature/login")]
#[case("release-1.0")]
fn create_branch_at_head(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", name]).assert().success();

    assert_eq!(branch_commit_id(dir, name), head_commit_id(dir));
    // creating a branch does not switch to it
    assert_eq!(
        std::fs::read_to_string(dir.join(".twig").join("HEAD"))
            .unwrap()
            .trim(),
        "ref: refs/heads/master"
    );
}

#[rstest]
fn create_duplicate_branch_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();

    run_twig_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("A branch with that name already exists.\n"));
}

#[rstest]
#[case("bad..name")]
#[case("trailing.lock")]
#[case("with space")]
fn create_branch_with_invalid_name_fails(init_repository_dir: TempDir, #[case] name: &str) {
    run_twig_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Invalid branch name"));
}
