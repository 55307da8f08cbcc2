//! Command: print version information.
use std::io::Write as _;

/// Version string baked in at build time, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("APPLYCONFIG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the applyconfig version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> std::io::Result<()> {
    writeln!(std::io::stdout().lock(), "applyconfig {}", version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
