#![allow(dead_code)]


/// Capture a finished command's stdout as text
pub fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
