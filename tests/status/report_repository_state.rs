use crate::common::command::{init_repository_dir, run_twig_command, twig_add};
use crate::common::file::{FileSpec, delete_file, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_empty_sections_for_clean_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = run_twig_command(init_repository_dir.path(), &["status"]).output()?;

    assert_eq!(
        stdout_of(&output),
        "=== Branches ===\n*master\n\n\
         === Staged Files ===\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\n\
         === Untracked Files ===\n\n"
    );

    Ok(())
}

#[rstest]
fn report_every_kind_of_change(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "feature"]).assert().success();

    // staged, then modified again on disk
    write_file(FileSpec::new(dir.join("staged.txt"), "v1".to_string()));
    twig_add(dir, "staged.txt").assert().success();
    write_file(FileSpec::new(dir.join("staged.txt"), "v2".to_string()));

    write_file(FileSpec::new(dir.join("1.txt"), "changed".to_string()));
    delete_file(&dir.join("a").join("2.txt"));
    write_file(FileSpec::new(dir.join("zz.txt"), "untracked".to_string()));

    let output = run_twig_command(dir, &["status"]).output()?;

    assert_eq!(
        stdout_of(&output),
        "=== Branches ===\nfeature\n*master\n\n\
         === Staged Files ===\nstaged.txt\n\n\
         === Removed Files ===\n\n\
         === Modifications Not Staged For Commit ===\n\
         1.txt (modified)\n\
         a/2.txt (deleted)\n\
         staged.txt (modified)\n\n\
         === Untracked Files ===\nzz.txt\n\n"
    );

    Ok(())
}

#[rstest]
fn list_removed_files(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["rm", "1.txt"]).assert().success();

    let output = run_twig_command(dir, &["status"]).output()?;
    let stdout = stdout_of(&output);

    assert!(stdout.contains("=== Removed Files ===\n1.txt\n\n"), "{stdout}");
    assert!(stdout.contains("=== Untracked Files ===\n\n"), "{stdout}");

    Ok(())
}
