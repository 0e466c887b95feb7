//! What a single invocation packages.

use super::Platform;

/// Platform and version of one release.
///
/// The version is an opaque token: it only ends up in file names, so the
/// only checks are that it is non-empty and forms a single path component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseTarget {
    platform: Platform,
    version: String,
}

impl ReleaseTarget {
    /// Creates a target, rejecting versions that cannot be used as a file name part.
    pub fn new(platform: Platform, version: impl Into<String>) -> Result<Self, String> {
        let version = version.into();
        validate_version(&version)?;
        Ok(Self { platform, version })
    }

    /// Target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Version token as given.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Staging directory and archive base name: `<product>-<platform>-<version>`.
    pub fn staging_name(&self, product: &str) -> String {
        format!("{}-{}-{}", product, self.platform, self.version)
    }
}

/// Checks that a version token is usable verbatim in a file name.
pub fn validate_version(version: &str) -> Result<(), String> {
    if version.trim().is_empty() {
        return Err("version cannot be empty".to_string());
    }
    if version.contains(['/', '\\']) || version == "." || version == ".." {
        return Err(format!(
            "version '{version}' must not contain path separators"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_name_joins_product_platform_and_version() {
        let target = ReleaseTarget::new(Platform::WindowsDebug, "1.0-rc2").unwrap();
        assert_eq!(target.staging_name("gokoban"), "gokoban-win-debug-1.0-rc2");
    }

    #[test]
    fn version_is_used_verbatim() {
        let target = ReleaseTarget::new(Platform::Linux, "v2.0.0+build.7").unwrap();
        assert_eq!(target.version(), "v2.0.0+build.7");
    }

    #[test]
    fn rejects_unusable_versions() {
        assert!(ReleaseTarget::new(Platform::Linux, "").is_err());
        assert!(ReleaseTarget::new(Platform::Linux, "   ").is_err());
        assert!(ReleaseTarget::new(Platform::Linux, "1.0/evil").is_err());
        assert!(ReleaseTarget::new(Platform::Linux, "..").is_err());
    }
}
