use crate::common::command::{
    branch_commit_id, count_commits, head_commit_id, init_repository_dir, run_twig_command,
    twig_add, twig_commit,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_fast_forwards_to_descendant(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "topic"]).assert().success();
    run_twig_command(dir, &["checkout", "topic"]).assert().success();
    write_file(FileSpec::new(dir.join("t.txt"), "topic".to_string()));
    twig_add(dir, "t.txt").assert().success();
    twig_commit(dir, "Topic work").assert().success();
    let topic_tip = branch_commit_id(dir, "topic");
    run_twig_command(dir, &["checkout", "master"]).assert().success();
    let commits = count_commits(dir);

    run_twig_command(dir, &["merge", "topic"])
        .assert()
        .success()
        .stdout(predicate::eq("Current branch fast-forwarded.\n"));

    assert_eq!(head_commit_id(dir), topic_tip);
    assert_eq!(count_commits(dir), commits);
    assert_eq!(read_file(&dir.join("t.txt")), "topic");
}

#[rstest]
fn merge_of_ancestor_is_a_no_op(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "old"]).assert().success();
    write_file(FileSpec::new(dir.join("t.txt"), "newer".to_string()));
    twig_add(dir, "t.txt").assert().success();
    twig_commit(dir, "Move ahead").assert().success();
    let head = head_commit_id(dir);

    run_twig_command(dir, &["merge", "old"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "Given branch is an ancestor of the current branch.\n",
        ));

    assert_eq!(head_commit_id(dir), head);
    assert_eq!(read_file(&dir.join("t.txt")), "newer");
}
