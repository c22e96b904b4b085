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

use crate::Gate;
use crate::Severity;
use crate::level::eq_ignore_ascii_case;

/// Build-time variable holding the threshold of a compilation unit.
pub const LEVEL_ENV: &str = "SEVLOG_LEVEL";
/// Build-time variable forcing maximum verbosity.
pub const ALL_ENV: &str = "SEVLOG_ALL";
/// Build-time variable suppressing the call-site prefix.
pub const EXCLUDE_CALL_SITE_ENV: &str = "SEVLOG_EXCLUDE_CALL_SITE";

impl Gate {
    /// Resolve a gate from build-time values, typically `option_env!` results captured at the
    /// call site by the leveled macros.
    ///
    /// Unset values keep [`Gate::DEFAULT`]. Flags are on unless empty, `0`, `false`, `no` or
    /// `off`. A threshold that cannot be parsed panics, which is a compile error when evaluated
    /// in a `const` item.
    ///
    /// ```
    /// use sevlog::Gate;
    /// use sevlog::Severity;
    ///
    /// const GATE: Gate = Gate::from_build_env(Some("error"), None, Some("1"));
    /// assert_eq!(GATE.configured_threshold(), Severity::Error);
    /// assert!(GATE.suppress_call_site());
    /// ```
    pub const fn from_build_env(
        level: Option<&str>,
        all: Option<&str>,
        exclude_call_site: Option<&str>,
    ) -> Gate {
        let mut gate = Gate::DEFAULT;

        if let Some(level) = level {
            match Severity::parse_const(level) {
                Some(threshold) => {
                    gate = Gate::new(threshold)
                        .with_force_maximum_verbosity(gate.force_maximum_verbosity())
                        .with_suppress_call_site(gate.suppress_call_site());
                }
                None => panic!("SEVLOG_LEVEL is not a severity name, tag or rank"),
            }
        }
        if let Some(all) = all {
            if is_truthy(all) {
                gate = gate.with_force_maximum_verbosity(true);
            }
        }
        if let Some(exclude) = exclude_call_site {
            if is_truthy(exclude) {
                gate = gate.with_suppress_call_site(true);
            }
        }

        gate
    }
}

const fn is_truthy(value: &str) -> bool {
    let bytes = value.as_bytes();
    !(bytes.is_empty()
        || eq_ignore_ascii_case(bytes, b"0")
        || eq_ignore_ascii_case(bytes, b"false")
        || eq_ignore_ascii_case(bytes, b"no")
        || eq_ignore_ascii_case(bytes, b"off"))
}
