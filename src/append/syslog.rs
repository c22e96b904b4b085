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

//! Appender for writing messages to the local syslog daemon.
//!
//! # Examples
//!
//!```rust, no_run
//! use sevlog::append::Syslog;
//! use sevlog::append::syslog::SyslogFormat;
//!
//! sevlog::Dispatcher::builder()
//!     .system_facility(Syslog::default().with_format(SyslogFormat::RFC5424))
//!     .apply();
//!
//! sevlog::log_error!("this message is written to syslog");
//! ```

use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::PoisonError;

use fasyslog::SDElement;
use fasyslog::sender::SyslogSender;

use crate::Error;
use crate::Severity;
use crate::append::Append;

// re-exports to avoid version conflicts
mod exported {
    pub use fasyslog::Facility;
    pub use fasyslog::format::SyslogContext;
}
pub use exported::*;

/// Sockets tried in order when no explicit socket is configured.
pub const WELL_KNOWN_SOCKETS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

/// The format of the syslog message.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SyslogFormat {
    /// [RFC 3164] (BSD syslog Protocol)
    ///
    /// [RFC 3164]: https://datatracker.ietf.org/doc/html/rfc3164
    #[default]
    RFC3164,
    /// [RFC 5424] (The Syslog Protocol)
    ///
    /// [RFC 5424]: https://datatracker.ietf.org/doc/html/rfc5424
    RFC5424,
}

#[derive(Debug, Clone)]
enum SyslogSocket {
    WellKnown,
    Path(PathBuf),
}

impl SyslogSocket {
    #[cfg(unix)]
    fn connect(&self) -> Result<SyslogSender, Error> {
        match self {
            SyslogSocket::Path(path) => connect_unix(path),
            SyslogSocket::WellKnown => {
                let mut last_error = None;
                for path in WELL_KNOWN_SOCKETS {
                    match connect_unix(Path::new(path)) {
                        Ok(sender) => return Ok(sender),
                        Err(err) => last_error = Some(err),
                    }
                }
                Err(last_error.unwrap_or_else(|| Error::new("no syslog socket available")))
            }
        }
    }

    #[cfg(not(unix))]
    fn connect(&self) -> Result<SyslogSender, Error> {
        Err(Error::new("syslog sockets are only available on unix platforms"))
    }
}

#[cfg(unix)]
fn connect_unix(path: &Path) -> Result<SyslogSender, Error> {
    fasyslog::sender::unix(path).map_err(|err| {
        Error::new("failed to connect to syslog")
            .with_context("socket", path.display())
            .with_source(err)
    })
}

/// An appender that writes messages to syslog.
///
/// The connection is opened on the first message. If it cannot be opened, or a write fails, the
/// message is dropped with an error and the next message connects again.
#[derive(Debug)]
pub struct Syslog {
    socket: SyslogSocket,
    format: SyslogFormat,
    context: SyslogContext,
    sender: Mutex<Option<SyslogSender>>,
}

impl Default for Syslog {
    fn default() -> Self {
        Self {
            socket: SyslogSocket::WellKnown,
            format: SyslogFormat::default(),
            context: SyslogContext::default(),
            sender: Mutex::new(None),
        }
    }
}

impl Syslog {
    /// Creates a [`Syslog`] appender writing to the given Unix socket instead of the well-known
    /// ones.
    pub fn unix(path: impl AsRef<Path>) -> Self {
        Self {
            socket: SyslogSocket::Path(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Set the format of the [`Syslog`] appender.
    pub fn with_format(mut self, format: SyslogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the context of the [`Syslog`] appender.
    pub fn with_context(mut self, context: SyslogContext) -> Self {
        self.context = context;
        self
    }

    fn render(&self, level: Severity, message: &str) -> String {
        let severity = to_syslog_severity(level);
        match self.format {
            SyslogFormat::RFC3164 => self
                .context
                .format_rfc3164(severity, Some(message))
                .to_string(),
            SyslogFormat::RFC5424 => {
                const EMPTY_MSGID: Option<&str> = None;
                const EMPTY_STRUCTURED_DATA: Vec<SDElement> = Vec::new();

                self.context
                    .format_rfc5424(
                        severity,
                        EMPTY_MSGID,
                        EMPTY_STRUCTURED_DATA,
                        Some(message),
                    )
                    .to_string()
            }
        }
    }
}

/// Translate a [`Severity`] into the syslog severity code of the same rank.
pub fn to_syslog_severity(level: Severity) -> fasyslog::Severity {
    match level {
        Severity::Emergency => fasyslog::Severity::EMERGENCY,
        Severity::Alert => fasyslog::Severity::ALERT,
        Severity::Critical => fasyslog::Severity::CRITICAL,
        Severity::Error => fasyslog::Severity::ERROR,
        Severity::Warning => fasyslog::Severity::WARNING,
        Severity::Notice => fasyslog::Severity::NOTICE,
        Severity::Info => fasyslog::Severity::INFORMATIONAL,
        Severity::Debug => fasyslog::Severity::DEBUG,
    }
}

impl Append for Syslog {
    fn append(&self, level: Severity, message: &str) -> Result<(), Error> {
        let message = self.render(level, message);

        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if sender.is_none() {
            *sender = Some(self.socket.connect()?);
        }
        if let Some(connected) = sender.as_mut() {
            if let Err(err) = connected.send_formatted(message.as_bytes()) {
                *sender = None;
                return Err(Error::new("failed to write syslog")
                    .with_context("severity", level)
                    .with_source(err));
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_mut() {
            Some(connected) => connected.flush().map_err(Error::from_io_error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_codes_match_ranks() {
        for level in Severity::ALL {
            assert_eq!(to_syslog_severity(level) as u8, level.rank());
        }
    }

    fn priority(line: &str) -> u8 {
        let end = line.find('>').unwrap();
        assert!(line.starts_with('<'), "line={line}");
        line[1..end].parse().unwrap()
    }

    #[test]
    fn rfc3164_carries_the_priority() {
        let syslog = Syslog::default();
        let line = syslog.render(Severity::Error, "app::disk disk failed: ENOSPC");
        assert_eq!(priority(&line) % 8, Severity::Error.rank(), "line={line}");
        assert!(line.ends_with("app::disk disk failed: ENOSPC"), "line={line}");
    }

    #[test]
    fn rfc5424_carries_the_priority() {
        let syslog = Syslog::default().with_format(SyslogFormat::RFC5424);
        let line = syslog.render(Severity::Debug, "x=5");
        assert_eq!(priority(&line) % 8, Severity::Debug.rank(), "line={line}");
        assert!(line.ends_with("x=5"), "line={line}");
    }

    #[cfg(unix)]
    #[test]
    fn missing_socket_is_reported_not_panicked() {
        let syslog = Syslog::unix("/nonexistent/sevlog/syslog.sock");
        let err = syslog.append(Severity::Alert, "lost").unwrap_err();
        assert_eq!(err.message(), "failed to connect to syslog");
        assert!(err.to_string().contains("/nonexistent/sevlog/syslog.sock"));
        syslog.flush().unwrap();
    }
}
