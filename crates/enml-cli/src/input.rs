//! Reading command input from files or stdin.

use std::io::Read;
use std::path::Path;

/// Path argument meaning "read stdin".
const STDIN_PATH: &str = "-";

/// Whether `path` refers to stdin.
pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read the whole input named by `path`.
pub(crate) fn read_input(path: &Path) -> std::io::Result<String> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        std::fs::read_to_string(path)
    }
}
