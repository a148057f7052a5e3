//! Immersive fullscreen presentation
//!
//! Keeps the activity window edge-to-edge and free of system chrome.
//! The decision is a pure function of the platform tier and the lifecycle
//! event; [`ImmersivePresentation`] only forwards the result to the host.

use bitflags::bitflags;

bitflags! {
    /// System UI visibility flags, bit-compatible with `android.view.View`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SystemUiFlags: u32 {
        const LOW_PROFILE = 0x0000_0001;
        /// Pre-ICS name of the same bit
        const STATUS_BAR_HIDDEN = 0x0000_0001;
        const HIDE_NAVIGATION = 0x0000_0002;
        const FULLSCREEN = 0x0000_0004;
        const LAYOUT_STABLE = 0x0000_0100;
        const LAYOUT_HIDE_NAVIGATION = 0x0000_0200;
        const LAYOUT_FULLSCREEN = 0x0000_0400;
        const IMMERSIVE = 0x0000_0800;
        const IMMERSIVE_STICKY = 0x0000_1000;
    }
}

impl SystemUiFlags {
    /// Hidden bars that come back on an edge swipe and hide again
    pub const fn immersive_sticky() -> Self {
        Self::FULLSCREEN
            .union(Self::HIDE_NAVIGATION)
            .union(Self::IMMERSIVE_STICKY)
            .union(Self::LAYOUT_FULLSCREEN)
            .union(Self::LAYOUT_HIDE_NAVIGATION)
            .union(Self::LAYOUT_STABLE)
    }

    /// Wire value for `View.setSystemUiVisibility(int)`
    pub fn to_visibility(self) -> i32 {
        self.bits() as i32
    }

    /// Decode a value reported by the host, keeping unknown bits
    pub fn from_visibility(visibility: i32) -> Self {
        Self::from_bits_retain(visibility as u32)
    }
}

/// Platform version buckets sharing the same presentation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PresentationTier {
    /// No system UI visibility API
    Unsupported,
    /// Status bar hiding only (API 11-13)
    Legacy,
    /// Fullscreen and low profile, no sticky immersive (API 14-18)
    Mid,
    /// Sticky immersive mode (API 19+)
    Modern,
}

impl PresentationTier {
    pub const LEGACY_MIN_SDK: u32 = 11;
    pub const MID_MIN_SDK: u32 = 14;
    pub const MODERN_MIN_SDK: u32 = 19;

    pub fn from_sdk(api_level: u32) -> Self {
        match api_level {
            level if level >= Self::MODERN_MIN_SDK => PresentationTier::Modern,
            level if level >= Self::MID_MIN_SDK => PresentationTier::Mid,
            level if level >= Self::LEGACY_MIN_SDK => PresentationTier::Legacy,
            _ => PresentationTier::Unsupported,
        }
    }

    pub fn supports_sticky_immersive(self) -> bool {
        self >= PresentationTier::Modern
    }
}

/// Host callbacks that trigger a presentation update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create,
    Resume,
    /// System UI visibility changed, e.g. bars revealed by a swipe
    SystemUiVisibilityChange { visibility: SystemUiFlags },
}

/// Flags applied on resume for each tier
pub fn flags_for(tier: PresentationTier) -> Option<SystemUiFlags> {
    match tier {
        PresentationTier::Unsupported => None,
        PresentationTier::Legacy => Some(SystemUiFlags::STATUS_BAR_HIDDEN),
        PresentationTier::Mid => Some(SystemUiFlags::FULLSCREEN | SystemUiFlags::LOW_PROFILE),
        PresentationTier::Modern => Some(SystemUiFlags::immersive_sticky()),
    }
}

/// Flags to apply for an event, or `None` when the host is left alone
pub fn flags_for_event(tier: PresentationTier, event: LifecycleEvent) -> Option<SystemUiFlags> {
    match event {
        LifecycleEvent::Resume => flags_for(tier),
        LifecycleEvent::Create | LifecycleEvent::SystemUiVisibilityChange { .. } => tier
            .supports_sticky_immersive()
            .then(SystemUiFlags::immersive_sticky),
    }
}

/// Host window that owns the decoration state
pub trait SystemUiHost {
    /// Replace the window's system UI visibility flags
    fn set_system_ui_visibility(&mut self, flags: SystemUiFlags);

    /// Start delivering [`LifecycleEvent::SystemUiVisibilityChange`]
    fn watch_system_ui_visibility(&mut self) {}
}

/// Adapter between host lifecycle events and [`flags_for_event`]
#[derive(Debug, Clone)]
pub struct ImmersivePresentation {
    tier: PresentationTier,
    watching: bool,
}

impl ImmersivePresentation {
    pub fn new(tier: PresentationTier) -> Self {
        Self {
            tier,
            watching: false,
        }
    }

    pub fn tier(&self) -> PresentationTier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: PresentationTier) {
        self.tier = tier;
    }

    /// Whether the visibility listener has been registered
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Apply the flags for `event` and return what was applied
    pub fn handle<H: SystemUiHost>(
        &mut self,
        event: LifecycleEvent,
        host: &mut H,
    ) -> Option<SystemUiFlags> {
        if matches!(event, LifecycleEvent::SystemUiVisibilityChange { .. }) && !self.watching {
            return None;
        }

        let flags = flags_for_event(self.tier, event)?;
        host.set_system_ui_visibility(flags);

        if event == LifecycleEvent::Create && !self.watching {
            host.watch_system_ui_visibility();
            self.watching = true;
        }

        Some(flags)
    }
}
