use crate::common::command::{init_repository_dir, run_twig_command, twig_add};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn stage_new_file_in_nested_directory(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(
        dir.join("x").join("y").join("z.txt"),
        "zed".to_string(),
    ));

    twig_add(dir, "x/y/z.txt").assert().success();

    let output = run_twig_command(dir, &["status"]).output()?;
    let stdout = stdout_of(&output);
    assert!(stdout.contains("=== Staged Files ===\nx/y/z.txt\n\n"), "{stdout}");
    assert!(stdout.contains("=== Untracked Files ===\n\n"), "{stdout}");

    Ok(())
}

#[rstest]
fn adding_a_non_existent_file_fails(init_repository_dir: TempDir) {
    twig_add(init_repository_dir.path(), "missing.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::eq("File does not exist.\n"));
}

#[rstest]
fn adding_metadata_files_is_rejected(init_repository_dir: TempDir) {
    twig_add(init_repository_dir.path(), ".twig/HEAD")
        .assert()
        .failure()
        .code(1);
}

#[rstest]
fn re_adding_a_modified_file_restages_latest_content(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "first edit".to_string()));
    twig_add(dir, "1.txt").assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "second edit".to_string()));
    twig_add(dir, "1.txt").assert().success();

    let output = run_twig_command(dir, &["status"]).output()?;
    let stdout = stdout_of(&output);
    assert!(stdout.contains("=== Staged Files ===\n1.txt\n\n"), "{stdout}");
    assert!(
        stdout.contains("=== Modifications Not Staged For Commit ===\n\n"),
        "{stdout}"
    );

    Ok(())
}
