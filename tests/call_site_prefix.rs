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

use std::sync::Mutex;
use std::sync::Once;

use sevlog::Append;
use sevlog::Dispatcher;
use sevlog::Error;
use sevlog::Gate;
use sevlog::Severity;

static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

#[derive(Debug)]
struct Capture;

impl Append for Capture {
    fn append(&self, _: Severity, message: &str) -> Result<(), Error> {
        LINES.lock().unwrap().push(message.to_owned());
        Ok(())
    }
}

fn install() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        Dispatcher::builder()
            .system_facility(Capture)
            .direct_stream(Capture)
            .apply();
    });
}

fn captured(marker: &str) -> Vec<String> {
    LINES
        .lock()
        .unwrap()
        .iter()
        .filter(|message| message.ends_with(marker))
        .cloned()
        .collect()
}

const PREFIXED: Gate = Gate::new(Severity::Debug).with_suppress_call_site(false);
const SUPPRESSED: Gate = Gate::new(Severity::Debug).with_suppress_call_site(true);

#[test]
fn prefix_names_the_calling_function() {
    install();

    let here = sevlog::call_site!();
    sevlog::log_error!(gate: PREFIXED, "x={} prefixed", 5);

    assert_eq!(here.function(), "call_site_prefix::prefix_names_the_calling_function");
    assert_eq!(
        captured("x=5 prefixed"),
        [format!("{} x=5 prefixed", here.function())]
    );
}

#[test]
fn suppressed_prefix_leaves_the_body() {
    install();

    sevlog::log_error!(gate: SUPPRESSED, "x={} suppressed", 5);

    assert_eq!(captured("x=5 suppressed"), ["x=5 suppressed"]);
}

const FALSY: [&str; 5] = ["", "0", "false", "no", "off"];

#[test]
fn default_gate_decides_the_prefix() {
    install();

    let here = sevlog::call_site!();
    sevlog::log_emergency!("x={} default gate", 5);

    let expected = if sevlog::gate!().suppress_call_site() {
        "x=5 default gate".to_owned()
    } else {
        format!("{} x=5 default gate", here.function())
    };
    assert_eq!(
        sevlog::gate!().suppress_call_site(),
        cfg!(feature = "exclude-call-site")
            || option_env!("SEVLOG_EXCLUDE_CALL_SITE")
                .is_some_and(|value| !FALSY.contains(&value.to_ascii_lowercase().as_str()))
    );
    assert_eq!(captured("x=5 default gate"), [expected]);
}

fn nested_helper() {
    let run = || sevlog::log_notice!(gate: PREFIXED, "from a closure");
    run();
}

#[test]
fn closures_are_attributed_to_the_enclosing_function() {
    install();

    nested_helper();

    assert_eq!(
        captured("from a closure"),
        ["call_site_prefix::nested_helper from a closure"]
    );
}

#[test]
fn emit_has_no_prefix() {
    install();

    sevlog::emit!(Severity::Warning, "emitted {}", "verbatim");

    assert_eq!(captured("emitted verbatim"), ["emitted verbatim"]);
}
