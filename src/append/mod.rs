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

//! Destinations for formatted log messages.

use std::fmt;

use crate::Error;
use crate::Severity;

mod stdio;
pub mod syslog;

pub use self::stdio::Stderr;
pub use self::syslog::Syslog;

/// An appender writes a fully formatted message to its destination.
///
/// Appenders perform no filtering; the level gate has already accepted the message.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Write one message at the given severity.
    fn append(&self, level: Severity, message: &str) -> Result<(), Error>;

    /// Flush any buffered messages.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
