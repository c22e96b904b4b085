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

/// The [`Gate`](crate::Gate) of the invoking compilation unit.
///
/// Resolved at compile time from the crate features and the `SEVLOG_LEVEL`, `SEVLOG_ALL` and
/// `SEVLOG_EXCLUDE_CALL_SITE` variables of the build environment. A malformed `SEVLOG_LEVEL` is
/// a compile error.
///
/// ```
/// const GATE: sevlog::Gate = sevlog::gate!();
/// ```
#[macro_export]
macro_rules! gate {
    () => {{
        const GATE: $crate::Gate = $crate::Gate::from_build_env(
            ::core::option_env!("SEVLOG_LEVEL"),
            ::core::option_env!("SEVLOG_ALL"),
            ::core::option_env!("SEVLOG_EXCLUDE_CALL_SITE"),
        );
        GATE
    }};
}

/// Log a message at the given severity if the gate accepts it.
///
/// The gate is checked first; the format arguments are only evaluated when it passes. Without
/// an explicit `gate:`, the gate of [`gate!`](crate::gate) is used.
///
/// ```no_run
/// use sevlog::Gate;
/// use sevlog::Severity;
///
/// const GATE: Gate = Gate::new(Severity::Info);
///
/// sevlog::log_at!(Severity::Notice, "listening on {}", "0.0.0.0:80");
/// sevlog::log_at!(gate: GATE, Severity::Info, "accepted {} connections", 3);
/// ```
#[macro_export]
macro_rules! log_at {
    (gate: $gate:expr, $level:expr, $($arg:tt)+) => {{
        let gate: $crate::Gate = $gate;
        let level: $crate::Severity = $level;
        if gate.enabled(level) {
            $crate::dispatch::log_accepted(
                &gate,
                level,
                &$crate::call_site!(),
                ::core::format_args!($($arg)+),
            );
        }
    }};
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $level, $($arg)+)
    };
}

/// Write a message at the given severity, bypassing the gate and the call-site prefix.
///
/// ```no_run
/// sevlog::emit!(sevlog::Severity::Debug, "always written: {}", 42);
/// ```
#[macro_export]
macro_rules! emit {
    ($level:expr, $($arg:tt)+) => {
        $crate::emit($level, ::core::format_args!($($arg)+))
    };
}

/// Log a message at [`Severity::Emergency`](crate::Severity::Emergency).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_emergency {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Emergency, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Emergency, $($arg)+)
    };
}

/// Log a message at [`Severity::Alert`](crate::Severity::Alert).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_alert {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Alert, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Alert, $($arg)+)
    };
}

/// Log a message at [`Severity::Critical`](crate::Severity::Critical).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_critical {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Critical, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Critical, $($arg)+)
    };
}

/// Log a message at [`Severity::Error`](crate::Severity::Error).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
///
/// ```no_run
/// fn flush() {
///     // writes "my_crate::flush disk failed: ENOSPC" unless the prefix is suppressed
///     sevlog::log_error!("disk failed: {}", "ENOSPC");
/// }
/// ```
#[macro_export]
macro_rules! log_error {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Error, $($arg)+)
    };
}

/// Log a message at [`Severity::Warning`](crate::Severity::Warning).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_warning {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Warning, $($arg)+)
    };
}

/// Log a message at [`Severity::Notice`](crate::Severity::Notice).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_notice {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Notice, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Notice, $($arg)+)
    };
}

/// Log a message at [`Severity::Info`](crate::Severity::Info).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_info {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Info, $($arg)+)
    };
}

/// Log a message at [`Severity::Debug`](crate::Severity::Debug).
///
/// Accepts an optional leading `gate: GATE,` followed by a format string and its arguments.
#[macro_export]
macro_rules! log_debug {
    (gate: $gate:expr, $($arg:tt)+) => {
        $crate::log_at!(gate: $gate, $crate::Severity::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!(gate: $crate::gate!(), $crate::Severity::Debug, $($arg)+)
    };
}
