use crate::common::command::{init_repository_dir, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_twice_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "A Twig version-control system already exists in the current directory.\n",
        ));
}

#[rstest]
#[case::status(&["status"])]
#[case::log(&["log"])]
#[case::branch(&["branch", "feature"])]
#[case::commit(&["commit", "message"])]
fn commands_outside_a_repository_fail(repository_dir: TempDir, #[case] args: &[&str]) {
    run_twig_command(repository_dir.path(), args)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("Not in an initialized Twig directory.\n"));

    assert!(!repository_dir.path().join(".twig").exists());
}
