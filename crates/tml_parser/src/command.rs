//! Deciding whether a line holds a console command.
//!
//! Every dialect keeps collecting description comments until it reaches the first command, so
//! this check is what decides where a description ends.

use crate::text::{is_space, trim_start, CiStr};

const COMMANDS: [&str; 3] = ["say", "exec", "set"];

/// Checks if the given line should be considered a command.
///
/// `allow_spark` also accepts anything starting with `spark`, which covers the BL3 style
/// `SparkLevelPatchEntry` (and similar) hotfix lines. Only the prefix is checked for those.
pub fn is_command(line: &str, allow_spark: bool) -> bool {
    let rest = trim_start(line);
    if rest.is_empty() {
        return false;
    }

    if allow_spark && CiStr::new(rest).starts_with("spark") {
        return true;
    }

    let word = rest.split(is_space).next().unwrap_or_default();
    COMMANDS.iter().any(|command| CiStr::new(word) == *command)
}
