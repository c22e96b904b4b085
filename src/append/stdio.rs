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

use std::io;
use std::io::Write;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;

use crate::Error;
use crate::Severity;
use crate::append::Append;

/// An appender that writes messages to standard error, one tagged line per line of text.
///
/// Output format:
///
/// ```text
/// [ERROR] my_app::storage::flush disk failed: ENOSPC
/// [WARNING] my_app::storage::check disk at 90%
/// ```
///
/// With [`with_timestamp`](Stderr::with_timestamp), each line starts with the local time:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 [ERROR] my_app::storage::flush disk failed: ENOSPC
/// ```
///
/// A message spanning several lines is written with the same prefix on every line. The whole
/// message is written with a single call while holding the standard error lock, so lines from
/// concurrent threads never interleave.
#[derive(Debug, Clone, Default)]
pub struct Stderr {
    #[cfg(feature = "jiff")]
    timestamp: bool,
    #[cfg(feature = "colored")]
    colored: bool,
}

impl Stderr {
    /// Prefix each line with the local time in RFC 3339 format.
    #[cfg(feature = "jiff")]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Color the severity tag.
    #[cfg(feature = "colored")]
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn prefix(&self, level: Severity) -> String {
        let mut prefix = String::with_capacity(48);

        #[cfg(feature = "jiff")]
        if self.timestamp {
            let time = jiff::Zoned::now().strftime("%Y-%m-%dT%H:%M:%S.%6f%:z");
            prefix.push_str(&time.to_string());
            prefix.push(' ');
        }

        let tag = format!("[{level}]");
        #[cfg(feature = "colored")]
        let tag = if self.colored {
            colorize(level, tag)
        } else {
            tag
        };
        prefix.push_str(&tag);

        prefix
    }

    fn render(&self, level: Severity, message: &str) -> String {
        let prefix = self.prefix(level);
        let mut text = String::with_capacity(message.len() + prefix.len() + 2);
        for line in message.split('\n') {
            text.push_str(&prefix);
            text.push(' ');
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

#[cfg(feature = "colored")]
fn colorize(level: Severity, tag: String) -> String {
    let color = match level {
        Severity::Emergency | Severity::Alert | Severity::Critical => Color::BrightRed,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Notice => Color::Cyan,
        Severity::Info => Color::Green,
        Severity::Debug => Color::Blue,
    };
    tag.color(color).to_string()
}

impl Append for Stderr {
    fn append(&self, level: Severity, message: &str) -> Result<(), Error> {
        let text = self.render(level, message);
        io::stderr()
            .lock()
            .write_all(text.as_bytes())
            .map_err(Error::from_io_error)
    }

    fn flush(&self) -> Result<(), Error> {
        io::stderr().flush().map_err(Error::from_io_error)
    }
}
