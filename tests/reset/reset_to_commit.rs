use crate::common::command::{
    head_commit_id, init_repository_dir, run_twig_command, twig_add, twig_commit,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_moves_branch_and_restores_snapshot(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("3.txt"), "three".to_string()));
    write_file(FileSpec::new(dir.join("1.txt"), "uno".to_string()));
    twig_add(dir, "3.txt").assert().success();
    twig_add(dir, "1.txt").assert().success();
    twig_commit(dir, "Later work").assert().success();

    run_twig_command(dir, &["reset", &initial])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir), initial);
    assert!(!dir.join("3.txt").exists());
    assert_eq!(read_file(&dir.join("1.txt")), "one");

    // the abandoned commit is still in the store
    run_twig_command(dir, &["find", "Later work"])
        .assert()
        .success();
}

#[rstest]
fn reset_with_untracked_file_in_the_way_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);

    write_file(FileSpec::new(dir.join("3.txt"), "three".to_string()));
    twig_add(dir, "3.txt").assert().success();
    twig_commit(dir, "Add three").assert().success();
    let later = head_commit_id(dir);

    run_twig_command(dir, &["reset", &initial])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("3.txt"), "untracked now".to_string()));

    run_twig_command(dir, &["reset", &later])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("There is an untracked file in the way"));

    assert_eq!(head_commit_id(dir), initial);
    assert_eq!(read_file(&dir.join("3.txt")), "untracked now");
}

#[rstest]
fn reset_to_unknown_commit_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["reset", "0123456789"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("No commit with that id exists.\n"));
}
