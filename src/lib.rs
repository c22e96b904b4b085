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

//! Sevlog is a severity-gated logging facility writing to syslog or to standard error.
//!
//! # Overview
//!
//! Messages carry one of eight [`Severity`] ranks, from [`Severity::Emergency`] to
//! [`Severity::Debug`]. Each call site checks its [`Gate`] before anything else: a message below
//! the threshold (default [`Severity::Warning`]) never evaluates its arguments, never gets
//! formatted and never reaches the [`Dispatcher`].
//!
//! Accepted messages are prefixed with the path of the calling function and written to the
//! active destination: the system log facility at first, or standard error once
//! [`activate_direct_stream`] has been called.
//!
//! # Examples
//!
//! Log to syslog with the default threshold:
//!
//! ```no_run
//! sevlog::log_error!("disk failed: {}", "ENOSPC");
//! sevlog::log_info!("not written: below the default threshold");
//! ```
//!
//! Send everything to standard error, e.g. while debugging:
//!
//! ```
//! use sevlog::Gate;
//! use sevlog::Severity;
//!
//! const GATE: Gate = Gate::new(Severity::Debug).with_suppress_call_site(true);
//!
//! sevlog::activate_direct_stream();
//! sevlog::log_debug!(gate: GATE, "x={}", 5);
//! ```
//!
//! # Configuration
//!
//! A call site without an explicit `gate:` uses [`gate!`], resolved when the calling crate is
//! compiled:
//!
//! * the `max-verbosity` feature forces [`Severity::Debug`], the `exclude-call-site` feature
//!   drops the call-site prefix;
//! * the `SEVLOG_LEVEL`, `SEVLOG_ALL` and `SEVLOG_EXCLUDE_CALL_SITE` build environment variables
//!   do the same per compilation unit.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod dispatch;
pub mod filter;
pub mod format;
pub mod trap;

mod error;
mod level;
mod macros;

pub use append::Append;
pub use dispatch::Destination;
pub use dispatch::Dispatcher;
pub use dispatch::activate_direct_stream;
pub use dispatch::dispatcher;
pub use dispatch::emit;
pub use error::Error;
pub use filter::Gate;
pub use format::CallSite;
pub use level::Severity;
