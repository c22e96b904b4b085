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

use std::sync::atomic::AtomicU8;

use super::Destination;
use super::Dispatcher;
use super::set_dispatcher;
use crate::Append;
use crate::append::Stderr;
use crate::append::Syslog;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A builder for configuring the destinations of a [`Dispatcher`].
///
/// Unset parts default to [`Syslog::default`], [`Stderr::default`] and [`DefaultTrap`].
///
/// # Examples
///
/// ```
/// use sevlog::append::Stderr;
///
/// let dispatcher = sevlog::Dispatcher::builder()
///     .direct_stream(Stderr::default())
///     .direct_stream_active(true)
///     .build();
///
/// dispatcher.emit(sevlog::Severity::Notice, "hello");
/// ```
#[must_use = "call `apply` to set the process-wide dispatcher or `build` to construct one"]
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    system_facility: Option<Box<dyn Append>>,
    direct_stream: Option<Box<dyn Append>>,
    trap: Option<Box<dyn Trap>>,
    direct_stream_active: bool,
}

impl DispatcherBuilder {
    /// Set the appender used while the destination is the system facility.
    pub fn system_facility(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.system_facility = Some(append.into());
        self
    }

    /// Set the appender used once the direct stream is active.
    pub fn direct_stream(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.direct_stream = Some(append.into());
        self
    }

    /// Set the trap receiving write errors.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = Some(trap.into());
        self
    }

    /// Start with the direct stream already active.
    ///
    /// This is the explicit, up-front form of [`Dispatcher::activate_direct_stream`].
    pub fn direct_stream_active(mut self, active: bool) -> Self {
        self.direct_stream_active = active;
        self
    }

    /// Build the [`Dispatcher`].
    pub fn build(self) -> Dispatcher {
        let destination = if self.direct_stream_active {
            Destination::DirectStream
        } else {
            Destination::SystemFacility
        };

        Dispatcher {
            destination: AtomicU8::new(destination as u8),
            system_facility: self
                .system_facility
                .unwrap_or_else(|| Box::new(Syslog::default())),
            direct_stream: self
                .direct_stream
                .unwrap_or_else(|| Box::new(Stderr::default())),
            trap: self.trap.unwrap_or_else(|| Box::new(DefaultTrap::default())),
        }
    }

    /// Set up the process-wide dispatcher.
    ///
    /// This should be called early in the execution of a program, before any message is logged;
    /// the first logged message otherwise installs the default dispatcher.
    ///
    /// # Errors
    ///
    /// Return the built dispatcher if a process-wide dispatcher has already been set.
    pub fn try_apply(self) -> Result<(), Dispatcher> {
        set_dispatcher(self.build())
    }

    /// Set up the process-wide dispatcher.
    ///
    /// # Panics
    ///
    /// Panic if the process-wide dispatcher has already been set.
    pub fn apply(self) {
        self.try_apply()
            .expect("DispatcherBuilder::apply must be called before the dispatcher initialized");
    }
}
