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

//! Bridge from the [`log`] crate.
//!
//! ```no_run
//! use sevlog::Gate;
//! use sevlog::Severity;
//! use sevlog::bridge::LogBridge;
//!
//! LogBridge::new(Gate::new(Severity::Info)).apply().unwrap();
//!
//! log::info!("routed through the sevlog dispatcher");
//! ```

use crate::Gate;
use crate::Severity;
use crate::dispatch::dispatcher;

/// A [`log::Log`] implementation forwarding records to the process-wide dispatcher.
///
/// The record target takes the place of the call-site prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridge {
    gate: Gate,
}

impl LogBridge {
    /// Create a bridge filtering records with the given gate.
    pub const fn new(gate: Gate) -> Self {
        Self { gate }
    }

    /// The gate filtering bridged records.
    pub const fn gate(&self) -> Gate {
        self.gate
    }

    /// Install the bridge as the global `log` logger.
    ///
    /// # Errors
    ///
    /// Return an error if a `log` logger has already been set.
    pub fn apply(self) -> Result<(), log::SetLoggerError> {
        let max_level = to_level_filter(self.gate.threshold());
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

/// Map a [`log::Level`] onto the [`Severity`] it is emitted at.
pub fn to_severity(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn => Severity::Warning,
        log::Level::Info => Severity::Info,
        log::Level::Debug => Severity::Debug,
        log::Level::Trace => Severity::Debug,
    }
}

/// The most verbose [`log::LevelFilter`] a threshold lets through.
pub fn to_level_filter(threshold: Severity) -> log::LevelFilter {
    match threshold {
        Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
            log::LevelFilter::Error
        }
        Severity::Warning => log::LevelFilter::Warn,
        Severity::Notice | Severity::Info => log::LevelFilter::Info,
        Severity::Debug => log::LevelFilter::Trace,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.gate.enabled(to_severity(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = to_severity(record.level());
        if !self.gate.enabled(level) {
            return;
        }

        if self.gate.suppress_call_site() {
            dispatcher().emit_fmt(level, *record.args());
        } else {
            dispatcher().emit_fmt(
                level,
                format_args!("{} {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {
        dispatcher().flush();
    }
}
