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

//! The sink dispatcher writing accepted messages to the active destination.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use crate::Append;
use crate::CallSite;
use crate::Gate;
use crate::Severity;
use crate::format::format_message;
use crate::trap::Trap;

mod builder;

pub use self::builder::DispatcherBuilder;

/// Where the dispatcher currently writes messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Destination {
    /// The system logging facility. The initial destination.
    SystemFacility = 0,
    /// A direct line-oriented stream, standard error by default.
    DirectStream = 1,
}

impl Destination {
    fn from_u8(value: u8) -> Destination {
        match value {
            0 => Destination::SystemFacility,
            _ => Destination::DirectStream,
        }
    }
}

/// Routes formatted messages to the system facility or to the direct stream.
///
/// The destination starts as [`Destination::SystemFacility`] and can be switched once, for
/// good, with [`activate_direct_stream`](Dispatcher::activate_direct_stream). The switch is
/// atomic; activating early, before other threads log, keeps every message of a thread on one
/// destination.
pub struct Dispatcher {
    destination: AtomicU8,
    system_facility: Box<dyn Append>,
    direct_stream: Box<dyn Append>,
    trap: Box<dyn Trap>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("destination", &self.destination())
            .field("system_facility", &self.system_facility)
            .field("direct_stream", &self.direct_stream)
            .field("trap", &self.trap)
            .finish()
    }
}

impl Dispatcher {
    /// Create a new [`DispatcherBuilder`].
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// The currently active destination.
    pub fn destination(&self) -> Destination {
        Destination::from_u8(self.destination.load(Ordering::Acquire))
    }

    /// Send every following message to the direct stream.
    ///
    /// Idempotent. There is no way back to the system facility.
    pub fn activate_direct_stream(&self) {
        self.destination
            .store(Destination::DirectStream as u8, Ordering::Release);
    }

    /// Write a fully formatted message to the active destination.
    ///
    /// No filtering happens here. A write failure goes to the trap and is not returned.
    pub fn emit(&self, level: Severity, message: &str) {
        let append = match self.destination() {
            Destination::SystemFacility => &self.system_facility,
            Destination::DirectStream => &self.direct_stream,
        };
        if let Err(err) = append.append(level, message) {
            self.trap.trap(&err);
        }
    }

    /// Format `args` without a call-site prefix and write the result.
    pub fn emit_fmt(&self, level: Severity, args: fmt::Arguments) {
        self.log(level, None, args);
    }

    /// Format a message with an optional call-site prefix and write it.
    pub fn log(&self, level: Severity, call_site: Option<&CallSite>, args: fmt::Arguments) {
        match format_message(call_site, args) {
            Ok(message) => self.emit(level, &message),
            Err(err) => self.trap.trap(&err.with_context("severity", level)),
        }
    }

    /// Flush both destinations.
    pub fn flush(&self) {
        for append in [&self.system_facility, &self.direct_stream] {
            if let Err(err) = append.flush() {
                self.trap.trap(&err);
            }
        }
    }
}

static DEFAULT_DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();

/// Return the process-wide dispatcher.
///
/// If none was installed with [`DispatcherBuilder::apply`], one writing to syslog and standard
/// error is created on first use.
pub fn dispatcher() -> &'static Dispatcher {
    DEFAULT_DISPATCHER.get_or_init(|| Dispatcher::builder().build())
}

/// Install the process-wide dispatcher.
///
/// Returns the given dispatcher back if one is already in place.
pub fn set_dispatcher(dispatcher: Dispatcher) -> Result<(), Dispatcher> {
    DEFAULT_DISPATCHER.set(dispatcher)
}

/// Write a message through the process-wide dispatcher, bypassing any level gate.
///
/// ```no_run
/// use sevlog::Severity;
///
/// sevlog::emit(Severity::Notice, format_args!("started with {} workers", 4));
/// ```
pub fn emit(level: Severity, args: fmt::Arguments) {
    dispatcher().emit_fmt(level, args);
}

/// Send every following message of the process-wide dispatcher to the direct stream.
///
/// Call it once, early in `main`, before logging from other threads starts.
pub fn activate_direct_stream() {
    dispatcher().activate_direct_stream();
}

/// The entry point of the leveled macros, after their gate has accepted the message.
#[doc(hidden)]
pub fn log_accepted(gate: &Gate, level: Severity, call_site: &CallSite, args: fmt::Arguments) {
    let call_site = (!gate.suppress_call_site()).then_some(call_site);
    dispatcher().log(level, call_site, args);
}
