//! Build metadata generated by the build script

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Crate version from Cargo.toml
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// One-line description used in the startup banner
pub fn version_line() -> String {
    format!(
        "workqueue {} ({}, built {}) - {}",
        version(),
        git_hash(),
        build_time(),
        PACKAGE_DESCRIPTION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line_contains_metadata() {
        let line = version_line();
        assert!(line.starts_with("workqueue "));
        assert!(line.contains(version()));
        assert!(line.contains(git_hash()));
        assert!(!build_time().is_empty());
    }
}
