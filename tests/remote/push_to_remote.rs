use crate::common::command::{
    branch_commit_id, head_commit_id, init_repository_dir, repository_dir, run_twig_command,
    twig_add, twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn push_sends_history_and_moves_remote_branch(
    init_repository_dir: TempDir,
    repository_dir: TempDir,
) {
    let local = init_repository_dir.path();
    let remote = repository_dir.path();
    run_twig_command(remote, &["init"]).assert().success();

    // the remote may be named by its .twig directory as well
    let remote_twig = remote.join(".twig").display().to_string();
    run_twig_command(local, &["add-remote", "origin", &remote_twig])
        .assert()
        .success();

    run_twig_command(local, &["push", "origin", "master"])
        .assert()
        .success();

    assert_eq!(branch_commit_id(remote, "master"), head_commit_id(local));
    run_twig_command(remote, &["find", "Initial commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains(head_commit_id(local)));
    run_twig_command(remote, &["checkout", "--", "a/2.txt"])
        .assert()
        .success();
}

#[rstest]
fn push_creates_missing_remote_branch(init_repository_dir: TempDir, repository_dir: TempDir) {
    let local = init_repository_dir.path();
    let remote = repository_dir.path();
    run_twig_command(remote, &["init"]).assert().success();
    let remote_master = branch_commit_id(remote, "master");

    run_twig_command(local, &["add-remote", "origin", &remote.display().to_string()])
        .assert()
        .success();
    run_twig_command(local, &["push", "origin", "shared"])
        .assert()
        .success();

    assert_eq!(branch_commit_id(remote, "shared"), head_commit_id(local));
    assert_eq!(branch_commit_id(remote, "master"), remote_master);
}

#[rstest]
fn push_behind_remote_fails(init_repository_dir: TempDir, repository_dir: TempDir) {
    let local = init_repository_dir.path();
    let remote = repository_dir.path();
    run_twig_command(remote, &["init"]).assert().success();
    write_file(FileSpec::new(remote.join("r.txt"), "remote work".to_string()));
    twig_add(remote, "r.txt").assert().success();
    twig_commit(remote, "Remote work").assert().success();
    let remote_tip = branch_commit_id(remote, "master");

    run_twig_command(local, &["add-remote", "origin", &remote.display().to_string()])
        .assert()
        .success();

    run_twig_command(local, &["push", "origin", "master"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq(
            "Please pull down remote changes before pushing.\n",
        ));

    assert_eq!(branch_commit_id(remote, "master"), remote_tip);
}
