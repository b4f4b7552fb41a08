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

//! Line-format template parsing and rendering.
//!
//! A template is scanned once into [`Token`]s; substitution is a separate
//! pass so that parsing can be tested token by token. Placeholders have the
//! form `%<key>` or `%<key>{<arg>}` where `<key>` is a single character and
//! `<arg>` is free text terminated by the next `}` (possibly empty).

use std::collections::HashMap;

use jiff::Zoned;
use jiff::fmt::strtime;

use crate::context::ErrorContext;
use crate::level::Level;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Literal(&'a str),
    Placeholder { key: char, arg: Option<&'a str> },
}

/// Scans `template` into a token sequence.
///
/// A lone trailing `%` is literal. A `{` that never closes does not start an
/// argument: the placeholder is emitted without one and the `{...` tail
/// stays literal.
pub(crate) fn parse(template: &str) -> Vec<Token<'_>> {
    let mut tokens = vec![];
    let mut rest = template;

    while !rest.is_empty() {
        let Some(percent) = rest.find('%') else {
            tokens.push(Token::Literal(rest));
            break;
        };
        if percent > 0 {
            tokens.push(Token::Literal(&rest[..percent]));
        }

        let after = &rest[percent + 1..];
        let Some(key) = after.chars().next() else {
            tokens.push(Token::Literal(&rest[percent..]));
            break;
        };
        let after_key = &after[key.len_utf8()..];

        if let Some(body) = after_key.strip_prefix('{') {
            if let Some(close) = body.find('}') {
                tokens.push(Token::Placeholder {
                    key,
                    arg: Some(&body[..close]),
                });
                rest = &body[close + 1..];
                continue;
            }
        }

        tokens.push(Token::Placeholder { key, arg: None });
        rest = after_key;
    }

    tokens
}

/// Values a single render pass draws placeholder substitutions from.
pub(crate) struct RenderInput<'a> {
    pub(crate) caller: &'a str,
    pub(crate) timestamp: &'a Zoned,
    pub(crate) level: Level,
    pub(crate) message: &'a str,
    pub(crate) error: &'a ErrorContext,
    /// Constructor-time entries; they win over dynamic values on collision.
    pub(crate) fixed: &'a HashMap<char, String>,
}

impl RenderInput<'_> {
    fn lookup(&self, key: char) -> Option<String> {
        if let Some(value) = self.fixed.get(&key) {
            return Some(value.clone());
        }
        match key {
            'c' => Some(self.caller.to_string()),
            'd' => Some(self.timestamp.to_string()),
            'e' => Some(self.error.message().to_string()),
            'l' => Some(self.level.ordinal().to_string()),
            'L' => Some(self.level.as_str().to_string()),
            'm' => Some(self.message.to_string()),
            's' => Some(self.error.first_frame().to_string()),
            'S' => Some(self.error.frames().join("\n")),
            _ => None,
        }
    }
}

/// Renders `template` against `input`, without a trailing newline.
pub(crate) fn render(template: &str, input: &RenderInput<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    for token in parse(template) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Placeholder { key, arg } => {
                out.push_str(&substitute(key, arg, input));
            }
        }
    }
    out
}

fn substitute(key: char, arg: Option<&str>, input: &RenderInput<'_>) -> String {
    let value = input.lookup(key).unwrap_or_default();
    let Some(arg) = arg else {
        return value;
    };
    // An empty or absent value renders as-is even when an argument is given.
    if value.is_empty() {
        return value;
    }
    match key {
        'd' => strtime::format(arg, input.timestamp).unwrap_or_default(),
        'm' => apply_case(arg, &value).unwrap_or_default(),
        'S' => {
            let frames = input.error.frames();
            let mut joined = String::new();
            for frame in frames {
                joined.push_str(arg);
                joined.push_str(frame);
            }
            joined
        }
        // No other key takes an argument.
        _ => String::new(),
    }
}

fn apply_case(arg: &str, value: &str) -> Option<String> {
    match arg {
        "capitalize" => {
            let mut chars = value.chars();
            chars.next().map(|first| {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        }
        "downcase" => Some(value.to_lowercase()),
        "swapcase" => Some(
            value
                .chars()
                .flat_map(|ch| {
                    if ch.is_uppercase() {
                        ch.to_lowercase().collect::<Vec<_>>()
                    } else {
                        ch.to_uppercase().collect::<Vec<_>>()
                    }
                })
                .collect(),
        ),
        "upcase" => Some(value.to_uppercase()),
        _ => None,
    }
}
