//! Host platform identity

use std::fmt;
use std::fs;

/// Kernel release suffix of WSL2 distributions
pub const WSL_KERNEL_SUFFIX: &str = "microsoft-standard-WSL2";

/// Where the kernel release is published on Linux
const OSRELEASE_PATH: &str = "/proc/sys/kernel/osrelease";

/// Operating system family
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Posix,
    Windows,
    Other(String),
}

impl OsFamily {
    /// Family of the running binary
    pub fn current() -> Self {
        if cfg!(unix) {
            OsFamily::Posix
        } else if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Other(std::env::consts::OS.to_string())
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Posix => write!(f, "posix"),
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::Other(name) => write!(f, "{}", name),
        }
    }
}

/// OS family plus kernel release
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: OsFamily,
    /// Empty when the release cannot be read
    pub kernel_release: String,
}

impl Platform {
    pub fn new(os: OsFamily, kernel_release: impl Into<String>) -> Self {
        Self {
            os,
            kernel_release: kernel_release.into(),
        }
    }

    /// Platform of the running process
    pub fn detect() -> Self {
        let kernel_release = fs::read_to_string(OSRELEASE_PATH)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let platform = Self::new(OsFamily::current(), kernel_release);
        tracing::debug!(os = %platform.os, release = %platform.kernel_release, "detected platform");
        platform
    }

    /// Running inside a WSL2 distribution
    pub fn is_wsl(&self) -> bool {
        is_wsl(&self.kernel_release, WSL_KERNEL_SUFFIX)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kernel_release.is_empty() {
            write!(f, "{}", self.os)
        } else {
            write!(f, "{} ({})", self.os, self.kernel_release)
        }
    }
}

/// Whether a kernel release string belongs to WSL2
#[inline]
pub fn is_wsl(release: &str, suffix: &str) -> bool {
    release.trim_end().ends_with(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wsl() {
        assert!(is_wsl("5.15.153.1-microsoft-standard-WSL2", WSL_KERNEL_SUFFIX));
        assert!(is_wsl("5.15.153.1-microsoft-standard-WSL2\n", WSL_KERNEL_SUFFIX));
        assert!(!is_wsl("6.8.0-45-generic", WSL_KERNEL_SUFFIX));
        assert!(!is_wsl("", WSL_KERNEL_SUFFIX));
    }

    #[test]
    fn test_platform_is_wsl() {
        let platform = Platform::new(OsFamily::Posix, "5.15.90.1-microsoft-standard-WSL2");
        assert!(platform.is_wsl());
        assert!(!Platform::new(OsFamily::Posix, "6.1.0").is_wsl());
    }

    #[test]
    fn test_display() {
        assert_eq!(Platform::new(OsFamily::Windows, "").to_string(), "windows");
        assert_eq!(
            Platform::new(OsFamily::Posix, "6.1.0").to_string(),
            "posix (6.1.0)"
        );
        assert_eq!(OsFamily::Other("wasi".into()).to_string(), "wasi");
    }

    #[test]
    fn test_detect_matches_build_target() {
        let platform = Platform::detect();
        assert_eq!(platform.os, OsFamily::current());
    }

    proptest::proptest! {
        #[test]
        fn prop_wsl_suffix_decides(prefix in "[0-9.]{1,12}-?[a-z]{0,8}") {
            let wsl = format!("{}-{}", prefix, WSL_KERNEL_SUFFIX);
            proptest::prop_assert!(is_wsl(&wsl, WSL_KERNEL_SUFFIX));
            proptest::prop_assert!(!is_wsl(&prefix, WSL_KERNEL_SUFFIX));
        }
    }
}
