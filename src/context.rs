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

//! Error details rendered by the `%e`, `%s`, and `%S` placeholders.

/// Error state attached to a logger.
///
/// Set it before a logging call whose template references `%e` (the error
/// message), `%s` (the first backtrace frame), or `%S` (all frames). The
/// context is not consumed by rendering: it persists until replaced with
/// [`Logger::set_error_context`](crate::Logger::set_error_context) or
/// dropped with [`Logger::clear_error_context`](crate::Logger::clear_error_context).
///
/// # Examples
///
/// ```
/// use rotolog::ErrorContext;
///
/// let ctx = ErrorContext::new("connection reset")
///     .with_backtrace(["io.rs:88", "client.rs:42"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub error: Option<String>,
    pub backtrace: Vec<String>,
}

impl ErrorContext {
    /// Creates a context carrying an error message and no backtrace.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            backtrace: vec![],
        }
    }

    /// Sets the backtrace frames, outermost first.
    pub fn with_backtrace<I>(mut self, frames: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.backtrace = frames.into_iter().map(Into::into).collect();
        self
    }

    /// Creates a context from a real error: the error's display text becomes
    /// the message and its source chain becomes the backtrace frames.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let mut backtrace = vec![];
        let mut source = error.source();
        while let Some(cause) = source {
            backtrace.push(cause.to_string());
            source = cause.source();
        }
        Self {
            error: Some(error.to_string()),
            backtrace,
        }
    }

    pub(crate) fn message(&self) -> &str {
        self.error.as_deref().unwrap_or_default()
    }

    pub(crate) fn first_frame(&self) -> &str {
        self.backtrace.first().map(String::as_str).unwrap_or_default()
    }

    pub(crate) fn frames(&self) -> &[String] {
        &self.backtrace
    }
}
