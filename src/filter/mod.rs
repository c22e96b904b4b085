// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The level gate deciding whether a message proceeds.
//!
//! A [`Gate`] is a plain `const` value. The leveled macros check it before they expand
//! `format_args!`, so a rejected message never evaluates its arguments:
//!
//! ```
//! use sevlog::Gate;
//! use sevlog::Severity;
//!
//! const GATE: Gate = Gate::new(Severity::Error).with_force_maximum_verbosity(false);
//!
//! fn expensive() -> u64 {
//!     unreachable!("filtered messages never evaluate their arguments")
//! }
//!
//! sevlog::log_warning!(gate: GATE, "value = {}", expensive());
//! ```

mod build_env;

pub use self::build_env::ALL_ENV;
pub use self::build_env::EXCLUDE_CALL_SITE_ENV;
pub use self::build_env::LEVEL_ENV;

use crate::Severity;

/// The default threshold when nothing else is configured.
pub const DEFAULT_THRESHOLD: Severity = Severity::Warning;

/// The resolved configuration of a call site: a threshold plus the prefix switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gate {
    threshold: Severity,
    force_maximum_verbosity: bool,
    suppress_call_site: bool,
}

impl Default for Gate {
    fn default() -> Self {
        Gate::DEFAULT
    }
}

impl Gate {
    /// The gate used when a call site provides no configuration.
    ///
    /// Threshold [`DEFAULT_THRESHOLD`], overridden by the `max-verbosity` and
    /// `exclude-call-site` crate features.
    pub const DEFAULT: Gate = Gate {
        threshold: DEFAULT_THRESHOLD,
        force_maximum_verbosity: cfg!(feature = "max-verbosity"),
        suppress_call_site: cfg!(feature = "exclude-call-site"),
    };

    /// Create a gate with the given threshold.
    ///
    /// Crate-wide feature overrides still apply.
    pub const fn new(threshold: Severity) -> Gate {
        Gate {
            threshold,
            ..Gate::DEFAULT
        }
    }

    /// Let every severity through regardless of the threshold.
    pub const fn with_force_maximum_verbosity(mut self, force: bool) -> Gate {
        self.force_maximum_verbosity = force;
        self
    }

    /// Omit the call-site identifier from formatted messages.
    pub const fn with_suppress_call_site(mut self, suppress: bool) -> Gate {
        self.suppress_call_site = suppress;
        self
    }

    /// The effective threshold: [`Severity::Debug`] if maximum verbosity is forced.
    pub const fn threshold(&self) -> Severity {
        if self.force_maximum_verbosity {
            Severity::Debug
        } else {
            self.threshold
        }
    }

    /// The configured threshold, ignoring the maximum verbosity override.
    pub const fn configured_threshold(&self) -> Severity {
        self.threshold
    }

    /// Whether maximum verbosity is forced.
    pub const fn force_maximum_verbosity(&self) -> bool {
        self.force_maximum_verbosity
    }

    /// Whether the call-site prefix is suppressed.
    pub const fn suppress_call_site(&self) -> bool {
        self.suppress_call_site
    }

    /// Whether a message at `level` proceeds.
    ///
    /// ```
    /// use sevlog::Gate;
    /// use sevlog::Severity;
    ///
    /// let gate = Gate::new(Severity::Error).with_force_maximum_verbosity(false);
    /// assert!(gate.enabled(Severity::Critical));
    /// assert!(gate.enabled(Severity::Error));
    /// assert!(!gate.enabled(Severity::Warning));
    /// ```
    #[inline(always)]
    pub const fn enabled(&self, level: Severity) -> bool {
        level.rank() <= self.threshold().rank()
    }

    /// Run `f` only if a message at `level` proceeds.
    ///
    /// This is the closure form of the leveled macros: the work needed to build a message lives
    /// inside `f` and is skipped entirely when the gate rejects.
    #[inline]
    pub fn lazy<R>(&self, level: Severity, f: impl FnOnce() -> R) -> Option<R> {
        if self.enabled(level) { Some(f()) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_warning() {
        let gate = Gate::new(DEFAULT_THRESHOLD).with_force_maximum_verbosity(false);
        let passed: Vec<_> = Severity::ALL
            .into_iter()
            .filter(|level| gate.enabled(*level))
            .collect();
        assert_eq!(
            passed,
            [
                Severity::Emergency,
                Severity::Alert,
                Severity::Critical,
                Severity::Error,
                Severity::Warning,
            ]
        );
    }

    #[test]
    fn enabled_iff_at_least_as_severe() {
        for threshold in Severity::ALL {
            let gate = Gate::new(threshold).with_force_maximum_verbosity(false);
            for level in Severity::ALL {
                assert_eq!(
                    gate.enabled(level),
                    level <= threshold,
                    "threshold={threshold} level={level}"
                );
            }
        }
    }

    #[test]
    fn forced_verbosity_lets_everything_through() {
        for threshold in Severity::ALL {
            let gate = Gate::new(threshold).with_force_maximum_verbosity(true);
            assert_eq!(gate.threshold(), Severity::Debug);
            assert_eq!(gate.configured_threshold(), threshold);
            assert!(Severity::ALL.iter().all(|level| gate.enabled(*level)));
        }
    }

    #[test]
    fn lazy_skips_the_closure_when_rejected() {
        let gate = Gate::new(Severity::Error).with_force_maximum_verbosity(false);
        let mut calls = 0;
        assert_eq!(gate.lazy(Severity::Info, || calls += 1), None);
        assert_eq!(calls, 0);
        assert_eq!(gate.lazy(Severity::Alert, || calls += 1), Some(()));
        assert_eq!(calls, 1);
    }

    #[cfg(feature = "max-verbosity")]
    #[test]
    fn max_verbosity_feature_forces_debug() {
        assert!(Gate::DEFAULT.force_maximum_verbosity());
        assert_eq!(Gate::DEFAULT.threshold(), Severity::Debug);
        assert_eq!(Gate::DEFAULT.configured_threshold(), DEFAULT_THRESHOLD);
        assert!(Gate::new(Severity::Emergency).enabled(Severity::Debug));
    }

    #[cfg(not(feature = "max-verbosity"))]
    #[test]
    fn default_gate_keeps_the_threshold() {
        assert!(!Gate::DEFAULT.force_maximum_verbosity());
        assert_eq!(Gate::DEFAULT.threshold(), Severity::Warning);
        assert!(!Gate::new(Severity::Emergency).enabled(Severity::Alert));
    }

    #[cfg(feature = "exclude-call-site")]
    #[test]
    fn exclude_call_site_feature_suppresses_the_prefix() {
        assert!(Gate::DEFAULT.suppress_call_site());
        assert!(Gate::new(Severity::Error).suppress_call_site());
    }

    #[cfg(not(feature = "exclude-call-site"))]
    #[test]
    fn default_gate_keeps_the_prefix() {
        assert!(!Gate::DEFAULT.suppress_call_site());
        assert!(!Gate::new(Severity::Error).suppress_call_site());
    }

    #[test]
    fn gate_macro_reads_the_build_env() {
        let expected = Gate::from_build_env(
            option_env!("SEVLOG_LEVEL"),
            option_env!("SEVLOG_ALL"),
            option_env!("SEVLOG_EXCLUDE_CALL_SITE"),
        );
        assert_eq!(crate::gate!(), expected);

        let unset = (
            option_env!("SEVLOG_LEVEL"),
            option_env!("SEVLOG_ALL"),
            option_env!("SEVLOG_EXCLUDE_CALL_SITE"),
        );
        if unset == (None, None, None) {
            assert_eq!(crate::gate!(), Gate::DEFAULT);
        }
    }

    #[test]
    fn gates_are_const() {
        const GATE: Gate = Gate::new(Severity::Notice)
            .with_force_maximum_verbosity(false)
            .with_suppress_call_site(true);
        const NOTICE: bool = GATE.enabled(Severity::Notice);
        const INFO: bool = GATE.enabled(Severity::Info);
        assert!(NOTICE);
        assert!(!INFO);
        assert!(GATE.suppress_call_site());
    }
}
