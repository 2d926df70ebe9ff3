use crate::common::command::{
    branch_commit_id, diverged_repository_dir, head_commit_id, run_twig_command, twig_add,
    twig_commit,
};
use crate::common::file::{FileSpec, read_file, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_divergent_branches_creates_merge_commit(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    let master_tip = branch_commit_id(dir, "master");
    let other_tip = branch_commit_id(dir, "other");

    let output = run_twig_command(dir, &["merge", "other"]).output()?;
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "");

    assert_eq!(read_file(&dir.join("g.txt")), "other side");
    assert_eq!(read_file(&dir.join("m.txt")), "master side");

    let merge = head_commit_id(dir);
    assert_ne!(merge, master_tip);
    let log = stdout_of(&run_twig_command(dir, &["log"]).output()?);
    assert!(
        log.starts_with(&format!(
            "===\ncommit {merge}\nMerge: {} {}\n",
            &master_tip[..7],
            &other_tip[..7]
        )),
        "{log}"
    );

    // the merge leaves nothing staged
    let status = stdout_of(&run_twig_command(dir, &["status"]).output()?);
    assert!(status.contains("=== Staged Files ===\n\n"), "{status}");
    assert!(status.contains("=== Untracked Files ===\n\n"), "{status}");

    Ok(())
}

#[rstest]
fn merge_removes_file_deleted_on_given_branch(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    run_twig_command(dir, &["checkout", "other"]).assert().success();
    run_twig_command(dir, &["rm", "1.txt"]).assert().success();
    twig_commit(dir, "Drop one on other").assert().success();
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    let output = run_twig_command(dir, &["merge", "other"]).output()?;

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "");
    assert!(!dir.join("1.txt").exists());
    run_twig_command(dir, &["checkout", "--", "1.txt"])
        .assert()
        .failure();

    Ok(())
}

#[rstest]
fn repeated_merge_starts_from_previous_merge(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    run_twig_command(dir, &["merge", "other"]).assert().success();

    run_twig_command(dir, &["checkout", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("g.txt"), "other again".to_string()));
    twig_add(dir, "g.txt").assert().success();
    twig_commit(dir, "Rework g.txt on other").assert().success();
    run_twig_command(dir, &["checkout", "master"]).assert().success();

    let output = run_twig_command(dir, &["merge", "other"]).output()?;

    // the first merge is the split point, so only the rework comes over
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "");
    assert_eq!(read_file(&dir.join("g.txt")), "other again");
    assert_eq!(read_file(&dir.join("m.txt")), "master side");

    Ok(())
}
