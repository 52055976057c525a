//! Memoized command resolution
//!
//! Probing the host (reading the kernel release, asking WSL for its
//! release) is slow enough to cache, but the answer can go stale: MBROLA or
//! WSL may be installed after the first probe. The cache is therefore an
//! owned value with explicit `refresh` and `invalidate`, never a global.

use parking_lot::RwLock;

use crate::{resolve_command, EnvConfig, EnvResult, NoWsl, Platform, SynthesizerCommand, WslProbe};

/// Source of the platform identity, re-read on every probe
pub trait PlatformSource: Send + Sync {
    fn platform(&self) -> Platform;
}

/// Reads the running host
#[derive(Clone, Copy, Debug, Default)]
pub struct HostPlatform;

impl PlatformSource for HostPlatform {
    fn platform(&self) -> Platform {
        Platform::detect()
    }
}

impl PlatformSource for Platform {
    fn platform(&self) -> Platform {
        self.clone()
    }
}

/// Cached synthesizer command for one environment
pub struct CommandCache {
    config: EnvConfig,
    platform: Box<dyn PlatformSource>,
    wsl: Box<dyn WslProbe>,
    resolved: RwLock<Option<EnvResult<SynthesizerCommand>>>,
}

impl CommandCache {
    /// Cache over the running host, without a WSL probe
    ///
    /// The probe is [`NoWsl`], so on a Windows host every lookup resolves to
    /// [`EnvError::WslUnavailable`](crate::EnvError::WslUnavailable). Windows
    /// callers must pass a real probe through [`CommandCache::with_probes`].
    pub fn new(config: EnvConfig) -> Self {
        Self::with_probes(config, HostPlatform, NoWsl)
    }

    pub fn with_probes(
        config: EnvConfig,
        platform: impl PlatformSource + 'static,
        wsl: impl WslProbe + 'static,
    ) -> Self {
        Self {
            config,
            platform: Box::new(platform),
            wsl: Box::new(wsl),
            resolved: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Cached answer, probing on first use or after `invalidate`
    pub fn get(&self) -> EnvResult<SynthesizerCommand> {
        if let Some(resolved) = self.resolved.read().as_ref() {
            return resolved.clone();
        }

        let mut slot = self.resolved.write();
        // another caller may have probed while we waited for the lock
        if let Some(resolved) = slot.as_ref() {
            return resolved.clone();
        }
        let resolved = self.probe();
        *slot = Some(resolved.clone());
        resolved
    }

    /// Probe again and replace the cached answer
    pub fn refresh(&self) -> EnvResult<SynthesizerCommand> {
        let resolved = self.probe();
        let previous = self.resolved.write().replace(resolved.clone());
        if previous.as_ref() != Some(&resolved) {
            tracing::info!(
                before = ?previous,
                after = ?resolved,
                "synthesizer command changed on refresh"
            );
        }
        resolved
    }

    /// Drop the cached answer; the next `get` probes again
    pub fn invalidate(&self) {
        self.resolved.write().take();
        tracing::debug!("synthesizer command cache invalidated");
    }

    /// Whether an answer is cached
    pub fn is_cached(&self) -> bool {
        self.resolved.read().is_some()
    }

    /// Resolved and present on `PATH`
    pub fn is_available(&self) -> bool {
        self.get().map(|cmd| cmd.is_executable()).unwrap_or(false)
    }

    fn probe(&self) -> EnvResult<SynthesizerCommand> {
        let platform = self.platform.platform();
        let resolved = resolve_command(&platform, self.wsl.as_ref(), &self.config);
        match &resolved {
            Ok(cmd) => tracing::debug!(platform = %platform, command = %cmd, "resolved synthesizer"),
            Err(e) => tracing::warn!(platform = %platform, "synthesizer unavailable: {}", e),
        }
        resolved
    }
}

impl Default for CommandCache {
    fn default() -> Self {
        Self::new(EnvConfig::default())
    }
}

impl std::fmt::Debug for CommandCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandCache")
            .field("config", &self.config)
            .field("resolved", &*self.resolved.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnvError, OsFamily};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const WSL_RELEASE: &str = "5.15.153.1-microsoft-standard-WSL2";

    /// WSL probe whose answer can be switched, counting calls
    #[derive(Clone, Default)]
    struct SwitchableWsl {
        installed: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl WslProbe for SwitchableWsl {
        fn kernel_release(&self) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.installed.load(Ordering::SeqCst) != 0).then(|| WSL_RELEASE.to_string())
        }
    }

    fn windows() -> Platform {
        Platform::new(OsFamily::Windows, "")
    }

    #[test]
    fn test_without_probe_windows_is_unavailable() {
        let cache = CommandCache::with_probes(EnvConfig::default(), windows(), NoWsl);
        assert_eq!(cache.get().unwrap_err(), EnvError::WslUnavailable);
        assert!(!cache.is_available());
    }

    #[test]
    fn test_get_memoizes() {
        let wsl = SwitchableWsl::default();
        wsl.installed.store(1, Ordering::SeqCst);
        let cache = CommandCache::with_probes(EnvConfig::default(), windows(), wsl.clone());

        assert!(!cache.is_cached());
        assert_eq!(cache.get().unwrap().to_string(), "wsl mbrola");
        assert_eq!(cache.get().unwrap().to_string(), "wsl mbrola");
        assert!(cache.is_cached());
        assert_eq!(wsl.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stale_until_refresh() {
        let wsl = SwitchableWsl::default();
        let cache = CommandCache::with_probes(EnvConfig::default(), windows(), wsl.clone());

        assert_eq!(cache.get(), Err(EnvError::WslUnavailable));

        // installed after the first probe: cached answer is stale
        wsl.installed.store(1, Ordering::SeqCst);
        assert_eq!(cache.get(), Err(EnvError::WslUnavailable));

        let cmd = cache.refresh().unwrap();
        assert_eq!(cmd.launcher.as_deref(), Some("wsl"));
        assert_eq!(cache.get().unwrap(), cmd);
        assert_eq!(wsl.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate_reprobes_lazily() {
        let wsl = SwitchableWsl::default();
        let cache = CommandCache::with_probes(EnvConfig::default(), windows(), wsl.clone());

        assert!(cache.get().is_err());
        cache.invalidate();
        assert!(!cache.is_cached());
        assert_eq!(wsl.calls.load(Ordering::SeqCst), 1);

        wsl.installed.store(1, Ordering::SeqCst);
        assert!(cache.get().is_ok());
        assert_eq!(wsl.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_posix_never_asks_wsl() {
        let wsl = SwitchableWsl::default();
        let cache = CommandCache::with_probes(
            EnvConfig::default(),
            Platform::new(OsFamily::Posix, "6.8.0"),
            wsl.clone(),
        );
        assert_eq!(cache.get().unwrap(), SynthesizerCommand::native("mbrola"));
        assert_eq!(wsl.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shared_across_threads() {
        let wsl = SwitchableWsl::default();
        wsl.installed.store(1, Ordering::SeqCst);
        let cache = Arc::new(CommandCache::with_probes(
            EnvConfig::default(),
            windows(),
            wsl.clone(),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
        assert_eq!(wsl.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unavailable_is_not_executable() {
        let cache = CommandCache::with_probes(EnvConfig::default(), windows(), NoWsl);
        assert!(!cache.is_available());
    }
}
