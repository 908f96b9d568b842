//! Capability value object - media kinds that need a runtime dependency

use serde::Serialize;

use super::MediaType;

/// A media kind whose helper methods depend on an extra package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Vector rendering through `flutter_svg`
    Vector,
    /// Animation playback through `lottie`
    Animation,
}

impl Capability {
    /// Every capability, in rendering order
    pub const ALL: [Capability; 2] = [Capability::Vector, Capability::Animation];

    /// Package that provides the capability
    pub fn package(&self) -> &'static str {
        match self {
            Capability::Vector => "flutter_svg",
            Capability::Animation => "lottie",
        }
    }

    /// Import line for the package
    pub fn import(&self) -> &'static str {
        match self {
            Capability::Vector => "package:flutter_svg/flutter_svg.dart",
            Capability::Animation => "package:lottie/lottie.dart",
        }
    }

    /// Leaf media type that requires this capability
    pub fn media_type(&self) -> MediaType {
        match self {
            Capability::Vector => MediaType::Vector,
            Capability::Animation => MediaType::Animation,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Vector => write!(f, "vector"),
            Capability::Animation => write!(f, "animation"),
        }
    }
}

/// Which capabilities the rendered code may rely on
///
/// A capability is available when its package is already declared or has
/// just been queued for addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilityAvailability {
    vector: bool,
    animation: bool,
}

impl CapabilityAvailability {
    /// Nothing available
    pub fn none() -> Self {
        Self::default()
    }

    /// Everything available
    pub fn all() -> Self {
        Self {
            vector: true,
            animation: true,
        }
    }

    /// Builder: set one capability
    pub fn with(mut self, capability: Capability, available: bool) -> Self {
        match capability {
            Capability::Vector => self.vector = available,
            Capability::Animation => self.animation = available,
        }
        self
    }

    /// Whether the capability may be used
    pub fn is_available(&self, capability: Capability) -> bool {
        match capability {
            Capability::Vector => self.vector,
            Capability::Animation => self.animation,
        }
    }
}
