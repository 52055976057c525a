//! Synthesizer command resolution

use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{find_on_path, is_wsl, EnvError, EnvResult, OsFamily, Platform, WSL_KERNEL_SUFFIX};

/// Environment configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Synthesizer executable name
    pub program: String,

    /// Launcher that runs Linux programs from a Windows host
    pub wsl_launcher: String,

    /// Kernel release suffix identifying WSL2
    pub wsl_kernel_suffix: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            program: "mbrola".to_string(),
            wsl_launcher: "wsl".to_string(),
            wsl_kernel_suffix: WSL_KERNEL_SUFFIX.to_string(),
        }
    }
}

/// Reports on the WSL distribution reachable from a Windows host
///
/// Implementations typically run `wsl uname -r`; that lives with the
/// caller, not here.
pub trait WslProbe: Send + Sync {
    /// Kernel release of the default distribution, `None` if unreachable
    fn kernel_release(&self) -> Option<String>;
}

/// Probe for hosts without WSL
#[derive(Clone, Copy, Debug, Default)]
pub struct NoWsl;

impl WslProbe for NoWsl {
    fn kernel_release(&self) -> Option<String> {
        None
    }
}

/// Probe answering with a fixed release
#[derive(Clone, Debug, Default)]
pub struct FixedWsl(pub Option<String>);

impl WslProbe for FixedWsl {
    fn kernel_release(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<F> WslProbe for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn kernel_release(&self) -> Option<String> {
        self()
    }
}

/// A resolved command line for the synthesizer
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SynthesizerCommand {
    /// Program that must run first (e.g. `wsl`)
    pub launcher: Option<String>,
    pub program: String,
}

impl SynthesizerCommand {
    pub fn native(program: impl Into<String>) -> Self {
        Self {
            launcher: None,
            program: program.into(),
        }
    }

    pub fn via(launcher: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            launcher: Some(launcher.into()),
            program: program.into(),
        }
    }

    /// Executable the host must find on its own `PATH`
    pub fn host_executable(&self) -> &str {
        self.launcher.as_deref().unwrap_or(&self.program)
    }

    /// argv prefix; callers append the voice, input and output paths
    pub fn argv(&self) -> Vec<String> {
        self.launcher
            .iter()
            .chain(std::iter::once(&self.program))
            .cloned()
            .collect()
    }

    /// Locate the host executable in a `PATH`-style list
    pub fn locate(&self, path_var: Option<&OsStr>) -> EnvResult<PathBuf> {
        let program = self.host_executable();
        find_on_path(program, path_var).ok_or_else(|| EnvError::NotFound {
            program: program.to_string(),
        })
    }

    /// Whether the host executable is on this process's `PATH`
    pub fn is_executable(&self) -> bool {
        self.locate(std::env::var_os("PATH").as_deref()).is_ok()
    }
}

impl fmt::Display for SynthesizerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv().join(" "))
    }
}

/// Pick the command line that launches the synthesizer on `platform`
pub fn resolve_command(
    platform: &Platform,
    wsl: &dyn WslProbe,
    config: &EnvConfig,
) -> EnvResult<SynthesizerCommand> {
    if is_wsl(&platform.kernel_release, &config.wsl_kernel_suffix) {
        return Ok(SynthesizerCommand::native(&config.program));
    }
    match &platform.os {
        OsFamily::Posix => Ok(SynthesizerCommand::native(&config.program)),
        OsFamily::Windows => match wsl.kernel_release() {
            Some(release) if is_wsl(&release, &config.wsl_kernel_suffix) => Ok(
                SynthesizerCommand::via(&config.wsl_launcher, &config.program),
            ),
            _ => Err(EnvError::WslUnavailable),
        },
        OsFamily::Other(os) => Err(EnvError::Unsupported { os: os.clone() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSL_RELEASE: &str = "5.15.153.1-microsoft-standard-WSL2";

    fn resolve(platform: Platform, wsl: &dyn WslProbe) -> EnvResult<SynthesizerCommand> {
        resolve_command(&platform, wsl, &EnvConfig::default())
    }

    #[test]
    fn test_posix_is_native() {
        let cmd = resolve(Platform::new(OsFamily::Posix, "6.8.0"), &NoWsl).unwrap();
        assert_eq!(cmd, SynthesizerCommand::native("mbrola"));
        assert_eq!(cmd.to_string(), "mbrola");
    }

    #[test]
    fn test_inside_wsl_is_native() {
        let cmd = resolve(Platform::new(OsFamily::Posix, WSL_RELEASE), &NoWsl).unwrap();
        assert_eq!(cmd.argv(), vec!["mbrola"]);
    }

    #[test]
    fn test_windows_with_wsl() {
        let probe = FixedWsl(Some(WSL_RELEASE.to_string()));
        let cmd = resolve(Platform::new(OsFamily::Windows, ""), &probe).unwrap();
        assert_eq!(cmd.to_string(), "wsl mbrola");
        assert_eq!(cmd.host_executable(), "wsl");
    }

    #[test]
    fn test_windows_without_wsl2() {
        let err = resolve(Platform::new(OsFamily::Windows, ""), &NoWsl).unwrap_err();
        assert_eq!(err, EnvError::WslUnavailable);

        // WSL1 kernels do not qualify
        let probe = FixedWsl(Some("4.4.0-19041-Microsoft".to_string()));
        let err = resolve(Platform::new(OsFamily::Windows, ""), &probe).unwrap_err();
        assert_eq!(err, EnvError::WslUnavailable);
    }

    #[test]
    fn test_unknown_os() {
        let err = resolve(Platform::new(OsFamily::Other("wasi".into()), ""), &NoWsl).unwrap_err();
        assert_eq!(err, EnvError::Unsupported { os: "wasi".into() });
        assert_eq!(err.to_string(), "MBROLA not available for wasi");
    }

    #[test]
    fn test_closure_probe() {
        let probe = || Some(WSL_RELEASE.to_string());
        let cmd = resolve(Platform::new(OsFamily::Windows, ""), &probe).unwrap();
        assert_eq!(cmd.launcher.as_deref(), Some("wsl"));
    }

    #[test]
    fn test_custom_program() {
        let config = EnvConfig {
            program: "mbrola-3.3".to_string(),
            ..EnvConfig::default()
        };
        let cmd = resolve_command(&Platform::new(OsFamily::Posix, ""), &NoWsl, &config).unwrap();
        assert_eq!(cmd.program, "mbrola-3.3");
    }

    #[test]
    fn test_locate_missing() {
        let cmd = SynthesizerCommand::native("definitely-not-a-real-synthesizer");
        let err = cmd.locate(Some(OsStr::new(""))).unwrap_err();
        assert_eq!(
            err,
            EnvError::NotFound {
                program: "definitely-not-a-real-synthesizer".into()
            }
        );
    }

    #[test]
    fn test_config_from_json() {
        let config: EnvConfig = serde_json::from_str(r#"{ "program": "mb" }"#).unwrap();
        assert_eq!(config.program, "mb");
        assert_eq!(config.wsl_launcher, "wsl");
    }
}
