//! Dependency Version Selector
//!
//! Maps a runtime version and a capability to the dependency constraint that
//! the generated code should be compiled against. The tables are plain data,
//! ordered from the highest runtime threshold down.

use crate::domain::value_objects::{Capability, SemanticVersion};

/// One rule: runtimes at or above `min_runtime` get `constraint`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRule {
    pub min_runtime: SemanticVersion,
    pub constraint: &'static str,
}

const fn rule(major: u32, minor: u32, patch: u32, constraint: &'static str) -> VersionRule {
    VersionRule {
        min_runtime: SemanticVersion::new(major, minor, patch),
        constraint,
    }
}

/// `flutter_svg` constraints by runtime version
pub const FLUTTER_SVG_RULES: &[VersionRule] = &[
    rule(3, 32, 0, "^2.2.3"),
    rule(2, 5, 0, "^2.0.10"),
    rule(2, 0, 0, "^1.1.6"),
    rule(0, 0, 0, "^1.0.3"),
];

/// `lottie` constraints by runtime version
pub const LOTTIE_RULES: &[VersionRule] = &[
    rule(3, 35, 0, "^3.3.2"),
    rule(3, 27, 0, "^3.3.0"),
    rule(3, 10, 0, "^3.1.0"),
    rule(3, 0, 0, "^2.7.0"),
    rule(2, 5, 0, "^2.3.0"),
    rule(0, 0, 0, "^2.0.0"),
];

/// Constraint used when the runtime version is unknown
pub const fn conservative_constraint(capability: Capability) -> &'static str {
    match capability {
        Capability::Vector => "^2.0.10",
        Capability::Animation => "^2.7.0",
    }
}

pub fn rules_for(capability: Capability) -> &'static [VersionRule] {
    match capability {
        Capability::Vector => FLUTTER_SVG_RULES,
        Capability::Animation => LOTTIE_RULES,
    }
}

/// Constraint for `capability` given the resolved runtime version
pub fn select_version(capability: Capability, runtime: Option<SemanticVersion>) -> &'static str {
    let Some(runtime) = runtime else {
        return conservative_constraint(capability);
    };
    rules_for(capability)
        .iter()
        .find(|rule| runtime >= rule.min_runtime)
        .map(|rule| rule.constraint)
        .unwrap_or_else(|| conservative_constraint(capability))
}

/// Major version named by a constraint such as `^2.0.10` or `>=1.1.6 <2.0.0`
pub fn constraint_major(constraint: &str) -> Option<u32> {
    SemanticVersion::from_constraint(constraint).map(|version| version.major)
}
