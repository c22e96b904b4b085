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

//! Severity levels of log messages.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The severity of a log message, from most to least severe.
///
/// The discriminants are the syslog priority codes, so a lower rank is more severe:
///
/// ```
/// use sevlog::Severity;
///
/// assert!(Severity::Emergency < Severity::Debug);
/// assert_eq!(Severity::Warning.rank(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    /// The system is unusable.
    Emergency = 0,
    /// Action must be taken immediately.
    Alert = 1,
    /// Critical conditions.
    Critical = 2,
    /// Error conditions.
    Error = 3,
    /// Warning conditions.
    Warning = 4,
    /// Normal but significant conditions.
    Notice = 5,
    /// Informational messages.
    Info = 6,
    /// Debug-level messages.
    Debug = 7,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Return the numeric rank; `0` is the most severe.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Return the severity of the given rank, if there is one.
    pub const fn from_rank(rank: u8) -> Option<Severity> {
        if (rank as usize) < Severity::ALL.len() {
            Some(Severity::ALL[rank as usize])
        } else {
            None
        }
    }

    /// Return the string representation of the `Severity`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "EMERG",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRIT",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    const fn long_name(&self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Parse a severity in a `const` context.
    ///
    /// Accepts the long name (`warning`), the short tag (`WARNING`, `CRIT`, `EMERG`) or the rank
    /// (`4`), ignoring ASCII case. Used to resolve build-time configuration.
    pub const fn parse_const(s: &str) -> Option<Severity> {
        let bytes = s.as_bytes();
        if bytes.len() == 1 && bytes[0].is_ascii_digit() {
            return Severity::from_rank(bytes[0] - b'0');
        }

        let mut i = 0;
        while i < Severity::ALL.len() {
            let level = Severity::ALL[i];
            if eq_ignore_ascii_case(bytes, level.as_str().as_bytes())
                || eq_ignore_ascii_case(bytes, level.long_name().as_bytes())
            {
                return Some(level);
            }
            i += 1;
        }

        None
    }
}

pub(crate) const fn eq_ignore_ascii_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if !a[i].eq_ignore_ascii_case(&b[i]) {
            return false;
        }
        i += 1;
    }
    true
}

impl fmt::Debug for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Severity, Self::Err> {
        Severity::parse_const(s.trim())
            .ok_or_else(|| Error::new(format!("malformed severity: {s:?}")))
    }
}
