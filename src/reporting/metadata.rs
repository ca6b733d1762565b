/// Build identification embedded at compile time by `build.rs`.
pub struct BuildInfo {
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub git_hash: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        git_hash: env!("GIT_HASH"),
    }
}

impl BuildInfo {
    /// One-line tool identification for report footers.
    pub fn describe(&self) -> String {
        format!("rpc-privacy {} ({}, built {})", self.version, self.git_hash, self.build_timestamp)
    }
}
