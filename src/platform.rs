//! Host environment classification.
//!
//! The hosting container is probed **once**, at bridge construction, and the
//! result is stored as a closed [`Platform`] variant. There is no runtime
//! re-detection: exactly one transport is active for the lifetime of the page.

/// What the embedder observed about its hosting environment at load time.
///
/// The fields mirror the three probes an embedded page can make: the
/// user-agent platform string, whether the container exposes a synchronous
/// native notify hook (`window.external.notify` in the classic embedded
/// shell), and whether a named webkit message handler is installed.
#[derive(Debug, Clone)]
pub struct HostProfile {
    /// Raw platform string, e.g. `"Win32"`, `"MacIntel"`, `"iPad"`.
    pub platform: String,
    /// A synchronous native notification hook is present.
    pub has_native_notify: bool,
    /// The named webkit message handler is present.
    pub has_webkit_handler: bool,
}

impl HostProfile {
    /// Profile for a plain browser frame: no container hooks at all.
    pub fn browser(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            has_native_notify: false,
            has_webkit_handler: false,
        }
    }

    fn is_windows(&self) -> bool {
        self.platform.to_lowercase().contains("win")
    }

    /// "Online" means neither embedded mobile container was detected.
    fn is_online(&self) -> bool {
        !self.has_webkit_handler && !self.has_native_notify
    }
}

/// The three mutually exclusive delivery mechanisms to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Synchronous native notification channel of a windows-based embedded
    /// mobile container.
    NativeNotify,
    /// Named message handler on a webkit bridge (the iOS-style container).
    WebkitMessageHandler,
    /// Standard cross-window message passing to the parent frame. The
    /// default whenever neither container above is detected.
    ParentPostMessage,
}

impl Platform {
    /// Classify the environment. Precedence follows the original container
    /// contract: the native notify hook wins on windows platforms, a plain
    /// online frame posts to its parent, and everything else is routed to
    /// the webkit handler.
    pub fn detect(profile: &HostProfile) -> Self {
        if profile.is_windows() && profile.has_native_notify {
            Platform::NativeNotify
        } else if profile.is_online() {
            Platform::ParentPostMessage
        } else {
            Platform::WebkitMessageHandler
        }
    }
}
