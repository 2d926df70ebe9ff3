use crate::common::command::{init_repository_dir, repository_dir, run_twig_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_and_remove_remote(init_repository_dir: TempDir, repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let remote_path = repository_dir.path().display().to_string();

    run_twig_command(dir, &["add-remote", "origin", &remote_path])
        .assert()
        .success();

    let remote_file = dir.join(".twig").join("remotes").join("origin");
    assert_eq!(
        std::fs::read_to_string(&remote_file).unwrap().trim(),
        remote_path
    );

    run_twig_command(dir, &["rm-remote", "origin"])
        .assert()
        .success();
    assert!(!remote_file.exists());
}

#[rstest]
fn add_duplicate_remote_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["add-remote", "origin", "../elsewhere"])
        .assert()
        .success();

    run_twig_command(dir, &["add-remote", "origin", "../other"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("A remote with that name already exists.\n"));
}

#[rstest]
fn remove_unknown_remote_fails(init_repository_dir: TempDir) {
    run_twig_command(init_repository_dir.path(), &["rm-remote", "ghost"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("A remote with that name does not exist.\n"));
}

#[rstest]
fn fetch_from_missing_remote_directory_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["add-remote", "origin", "../does-not-exist/.twig"])
        .assert()
        .success();

    run_twig_command(dir, &["fetch", "origin", "master"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("Remote directory not found.\n"));
}
