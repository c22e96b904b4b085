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

//! Traps for errors that happen while writing log messages.
//!
//! Emitting never returns an error to the caller. Failures of a destination are handed to the
//! dispatcher's [`Trap`] instead and the message is dropped.

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;

/// A trap that receives errors raised by appenders.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error. Must not panic.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A default trap that sends errors to standard error if possible.
///
/// If standard error is not available, it does nothing.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &Error) {
        let _ = writeln!(io::stderr(), "{err}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingTrap {
        errors: Mutex<Vec<String>>,
    }

    impl Trap for RecordingTrap {
        fn trap(&self, err: &Error) {
            self.errors.lock().unwrap().push(err.message().to_owned());
        }
    }

    #[test]
    fn custom_traps_box_into_the_trait_object() {
        let trap: Box<dyn Trap> = RecordingTrap::default().into();
        trap.trap(&Error::new("syslog closed"));
        assert!(format!("{trap:?}").contains("syslog closed"));
    }

    #[test]
    fn default_trap_writes_without_panicking() {
        let trap: Box<dyn Trap> = DefaultTrap::default().into();
        let err = Error::new("written by the default trap test").with_context("severity", "ERROR");
        trap.trap(&err);
    }
}
