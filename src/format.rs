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

//! Message formatting and call-site prefixes.
//!
//! A formatted message is the call-site identifier, one space, and the body:
//!
//! ```text
//! my_app::storage::flush disk failed: ENOSPC
//! ```
//!
//! The identifier is the fully qualified path of the function that invoked the logging macro,
//! as reported by [`std::any::type_name`], with closure segments removed. Template and argument
//! mismatches are rejected at compile time by [`format_args!`]; a `Display` implementation that
//! returns an error surfaces as an [`Error`] handed to the dispatcher's trap.

use std::fmt;
use std::fmt::Write;

use crate::Error;

/// Where a log macro was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    function: &'static str,
    module_path: &'static str,
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Create a call site. Usually obtained through [`call_site!`](crate::call_site).
    pub const fn new(
        function: &'static str,
        module_path: &'static str,
        file: &'static str,
        line: u32,
    ) -> Self {
        Self {
            function,
            module_path,
            file,
            line,
        }
    }

    /// The fully qualified path of the invoking function.
    pub fn function(&self) -> &'static str {
        self.function
    }

    /// The module path of the invoking code.
    pub fn module_path(&self) -> &'static str {
        self.module_path
    }

    /// The source file of the invoking code.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// The line of the invocation.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function)
    }
}

/// Capture the [`CallSite`] of the enclosing function.
///
/// ```
/// fn flush() -> sevlog::CallSite {
///     sevlog::call_site!()
/// }
///
/// assert!(flush().function().ends_with("::flush"));
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __sevlog_here() {}
        fn __sevlog_type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::CallSite::new(
            $crate::format::function_path(__sevlog_type_name_of(__sevlog_here)),
            ::core::module_path!(),
            ::core::file!(),
            ::core::line!(),
        )
    }};
}

/// Turn the type name of the marker function planted by [`call_site!`](crate::call_site) into
/// the path of the function around it.
#[doc(hidden)]
pub fn function_path(type_name: &'static str) -> &'static str {
    let mut path = type_name
        .strip_suffix("::__sevlog_here")
        .unwrap_or(type_name);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path
}

/// Render the final text of a message.
///
/// With a call site, the text is `<function> <body>`; without one it is exactly the body.
pub fn format_message(call_site: Option<&CallSite>, args: fmt::Arguments) -> Result<String, Error> {
    if let (None, Some(body)) = (call_site, args.as_str()) {
        return Ok(body.to_owned());
    }

    let mut text = String::new();
    if let Some(call_site) = call_site {
        text.push_str(call_site.function());
        text.push(' ');
    }
    text.write_fmt(args).map_err(|err| {
        let err = Error::from_fmt_error(err);
        match call_site {
            Some(call_site) => err
                .with_context("function", call_site.function())
                .with_context("location", format!("{}:{}", call_site.file(), call_site.line())),
            None => err,
        }
    })?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate() -> CallSite {
        crate::call_site!()
    }

    #[test]
    fn call_site_names_the_enclosing_function() {
        let call_site = locate();
        assert_eq!(call_site.function(), "sevlog::format::tests::locate");
        assert_eq!(call_site.module_path(), "sevlog::format::tests");
        assert!(call_site.file().ends_with("format.rs"));
        assert!(call_site.line() > 0);
    }

    #[test]
    fn closures_report_the_outer_function() {
        let call_site = (|| crate::call_site!())();
        assert_eq!(
            call_site.function(),
            "sevlog::format::tests::closures_report_the_outer_function"
        );
    }

    #[test]
    fn function_path_strips_marker_and_closures() {
        assert_eq!(function_path("app::main::__sevlog_here"), "app::main");
        assert_eq!(
            function_path("app::run::{{closure}}::{{closure}}::__sevlog_here"),
            "app::run"
        );
        assert_eq!(function_path("app::plain"), "app::plain");
    }

    #[test]
    fn prefix_is_separated_by_a_space() {
        let call_site = CallSite::new("app::disk::check", "app::disk", "src/disk.rs", 12);
        let text = format_message(Some(&call_site), format_args!("x={}", 5)).unwrap();
        insta::assert_snapshot!(text, @"app::disk::check x=5");
    }

    #[test]
    fn suppressed_prefix_is_exactly_the_body() {
        let text = format_message(None, format_args!("x={}", 5)).unwrap();
        assert_eq!(text, "x=5");
        let text = format_message(None, format_args!("static body")).unwrap();
        assert_eq!(text, "static body");
    }

    #[test]
    fn failing_display_is_an_error() {
        struct Broken;

        impl fmt::Display for Broken {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let call_site = CallSite::new("app::broken", "app", "src/main.rs", 3);
        let err = format_message(Some(&call_site), format_args!("{}", Broken)).unwrap_err();
        assert_eq!(err.message(), "failed to perform format");
        assert!(err.to_string().contains("function: app::broken"));
        assert!(err.to_string().contains("location: src/main.rs:3"));
    }
}
