use serde::Serialize;

/// Compile-time build metadata, populated by `build.rs`.
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub build_profile: &'static str,
    pub build_timestamp: &'static str,
    pub version: &'static str,
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "wichtel {} ({} build, {})",
            self.version, self.build_profile, self.build_timestamp
        )
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        build_profile: env!("BUILD_PROFILE"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        version: env!("REPO_VERSION"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_info_is_populated() {
        let info = build_info();
        assert!(!info.version.is_empty());
        assert!(!info.build_profile.is_empty());
        assert!(info.to_string().starts_with("wichtel "));
    }
}
