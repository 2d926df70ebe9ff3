pub mod branch_name;

/// git-style ref name rules: no leading dot or slash, no `..`, no `@{`,
/// no `.lock` suffix, no control or glob characters
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
