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

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::panic::Location;

use jiff::Zoned;

use crate::clock::Clock;
use crate::context::ErrorContext;
use crate::error::Error;
use crate::level::Level;
use crate::level::LevelSpec;
use crate::rolling::RollingFile;
use crate::stream::Stream;
use crate::template;
use crate::template::RenderInput;

/// The default line format: timestamp, level name, and message separated by
/// tabs, with error details appended when an error context is set.
pub const DEFAULT_LOG_FORMAT: &str = "%d{%Y-%m-%d %H:%M:%S}%t%L%t%m %e %s";

#[derive(Debug)]
enum Destination {
    Stream(Box<dyn Stream>),
    File(RollingFile),
}

/// A line-oriented logger bound to a single destination.
///
/// Each leveled call is gated against the configured level, rendered through
/// the line-format template, and written with a trailing newline. File
/// destinations are rotated whenever the filename format renders to a new
/// name.
///
/// All operations take `&mut self` and perform blocking I/O inline; sharing
/// one instance across threads requires external synchronization, and the
/// rotation check-then-open sequence is not atomic across processes.
///
/// # Examples
///
/// ```
/// use rotolog::Level;
/// use rotolog::Logger;
///
/// # fn main() -> anyhow::Result<()> {
/// let dir = tempfile::tempdir()?;
/// let format = dir.path().join("app-%Y-%m-%d.log");
///
/// let mut logger = Logger::rolling(format.display().to_string())?.with_level(Level::Debug);
/// logger.info("service started")?;
/// logger.debug("cache warmed")?;
/// logger.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Logger {
    destination: Destination,
    level: Level,
    log_format: String,
    placeholders: HashMap<char, String>,
    error_context: ErrorContext,
    clock: Clock,
}

impl Logger {
    /// Creates a logger over a fixed stream.
    ///
    /// Fails with [`Error::DestinationClosed`] if the stream already reports
    /// itself closed. Stream destinations are never rotated and never closed
    /// by the logger.
    pub fn from_stream(stream: impl Stream + 'static) -> anyhow::Result<Logger> {
        if stream.is_closed() {
            return Err(Error::DestinationClosed.into());
        }
        Ok(Self::new(Destination::Stream(Box::new(stream)), Clock::System))
    }

    /// Creates a logger over a rotating file destination.
    ///
    /// `format` is a date/time filename format: literal characters pass
    /// through and conversion specifiers substitute date/time fields, so
    /// `"app-%Y-%m-%d.log"` yields one file per day. The first file is
    /// opened immediately; an open failure propagates from construction.
    pub fn rolling(format: impl Into<String>) -> anyhow::Result<Logger> {
        Self::rolling_with_clock(format, Clock::System)
    }

    fn rolling_with_clock(format: impl Into<String>, clock: Clock) -> anyhow::Result<Logger> {
        let mut file = RollingFile::new(format);
        file.ensure_open(&clock.now())?;
        Ok(Self::new(Destination::File(file), clock))
    }

    fn new(destination: Destination, clock: Clock) -> Logger {
        Logger {
            destination,
            level: Level::default(),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            placeholders: fixed_placeholders(),
            error_context: ErrorContext::default(),
            clock,
        }
    }

    /// Sets the initial level, given by ordinal or canonical name.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<LevelSpec>) -> Logger {
        self.set_level(level);
        self
    }

    /// Sets the initial line-format template.
    #[must_use]
    pub fn with_log_format(mut self, format: impl Into<String>) -> Logger {
        self.set_log_format(format);
        self
    }

    /// The configured minimum level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Reconfigures the level. Unrecognized names and out-of-range ordinals
    /// silently resolve to [`Level::Unknown`].
    pub fn set_level(&mut self, level: impl Into<LevelSpec>) {
        self.level = level.into().resolve();
    }

    /// The line-format template.
    pub fn log_format(&self) -> &str {
        &self.log_format
    }

    /// Replaces the line-format template.
    pub fn set_log_format(&mut self, format: impl Into<String>) {
        self.log_format = format.into();
    }

    /// The rotation filename format, or `None` for a stream destination.
    pub fn file_format(&self) -> Option<&str> {
        match &self.destination {
            Destination::Stream(_) => None,
            Destination::File(file) => Some(file.format()),
        }
    }

    /// Write access to the constructor-time placeholder table.
    ///
    /// Entries here win over the per-call dynamic values on key collision,
    /// so inserting `'m'` pins the rendered message.
    pub fn placeholders_mut(&mut self) -> &mut HashMap<char, String> {
        &mut self.placeholders
    }

    /// The error state rendered by `%e`, `%s`, and `%S`.
    pub fn error_context(&self) -> &ErrorContext {
        &self.error_context
    }

    /// Attaches error state for subsequent writes. Rendering does not
    /// consume it; it persists until replaced or cleared.
    pub fn set_error_context(&mut self, context: ErrorContext) {
        self.error_context = context;
    }

    /// Drops the attached error state.
    pub fn clear_error_context(&mut self) {
        self.error_context = ErrorContext::default();
    }

    /// Logs `message` at `level`.
    ///
    /// Returns immediately with no side effect when the gate rejects the
    /// level: no rotation check, no rendering.
    #[track_caller]
    pub fn log(
        &mut self,
        level: impl Into<LevelSpec>,
        message: impl fmt::Display,
    ) -> anyhow::Result<()> {
        self.emit(level.into().resolve(), &message, Location::caller())
    }

    /// Logs `message` at [`Level::Fatal`].
    #[track_caller]
    pub fn fatal(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Fatal, &message, Location::caller())
    }

    /// Logs `message` at [`Level::Error`].
    #[track_caller]
    pub fn error(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Error, &message, Location::caller())
    }

    /// Logs `message` at [`Level::Warn`].
    #[track_caller]
    pub fn warn(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Warn, &message, Location::caller())
    }

    /// Logs `message` at [`Level::Info`].
    #[track_caller]
    pub fn info(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Info, &message, Location::caller())
    }

    /// Logs `message` at [`Level::Debug`].
    #[track_caller]
    pub fn debug(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Debug, &message, Location::caller())
    }

    /// Logs `message` at [`Level::Trace`].
    #[track_caller]
    pub fn trace(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Trace, &message, Location::caller())
    }

    /// Logs `message` at [`Level::Unknown`] (ordinal 0), which passes every
    /// gate. The line still goes through the template.
    #[track_caller]
    pub fn always(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        self.emit(Level::Unknown, &message, Location::caller())
    }

    /// Logs each element of `messages` as its own line.
    ///
    /// The gate is checked once up front, not per element: either every line
    /// is emitted or none is.
    #[track_caller]
    pub fn multi<I>(&mut self, level: impl Into<LevelSpec>, messages: I) -> anyhow::Result<()>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let caller = Location::caller();
        let level = level.into().resolve();
        if !self.enabled(level) {
            return Ok(());
        }
        for message in messages {
            self.write_line(level, &message.to_string(), caller)?;
        }
        Ok(())
    }

    /// Writes `message` verbatim plus a trailing newline, bypassing both the
    /// gate and the template. The rotation check still runs first.
    pub fn plain(&mut self, message: impl fmt::Display) -> anyhow::Result<()> {
        let now = self.clock.now();
        let mut line = message.to_string();
        line.push('\n');
        self.write_raw(line.as_bytes(), &now)
    }

    /// Closes the currently open rotated file, if any.
    ///
    /// A no-op for stream destinations: the logger does not own handles it
    /// was given. Idempotent; a later write transparently reopens the file
    /// through the rotation check.
    pub fn close(&mut self) {
        if let Destination::File(file) = &mut self.destination {
            file.close();
        }
    }

    fn enabled(&self, level: Level) -> bool {
        level.ordinal() <= self.level.ordinal()
    }

    fn emit(
        &mut self,
        level: Level,
        message: &dyn fmt::Display,
        caller: &Location<'_>,
    ) -> anyhow::Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        self.write_line(level, &message.to_string(), caller)
    }

    fn write_line(
        &mut self,
        level: Level,
        message: &str,
        caller: &Location<'_>,
    ) -> anyhow::Result<()> {
        let now = self.clock.now();
        let location = format!("{}:{}", caller.file(), caller.line());
        let input = RenderInput {
            caller: &location,
            timestamp: &now,
            level,
            message,
            error: &self.error_context,
            fixed: &self.placeholders,
        };
        let mut line = template::render(&self.log_format, &input);
        line.push('\n');
        self.write_raw(line.as_bytes(), &now)
    }

    fn write_raw(&mut self, bytes: &[u8], now: &Zoned) -> anyhow::Result<()> {
        match &mut self.destination {
            Destination::Stream(stream) => {
                stream.write_all(bytes).map_err(Error::Io)?;
                stream.flush().map_err(Error::Io)?;
            }
            Destination::File(file) => {
                let file = file.ensure_open(now)?;
                file.write_all(bytes).map_err(Error::Io)?;
                file.flush().map_err(Error::Io)?;
            }
        }
        Ok(())
    }
}

fn fixed_placeholders() -> HashMap<char, String> {
    let exe = std::env::current_exe().unwrap_or_default();
    let mut table = HashMap::new();
    table.insert('n', "\n".to_string());
    table.insert('p', std::process::id().to_string());
    table.insert('t', "\t".to_string());
    table.insert(
        'x',
        exe.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );
    table.insert('X', exe.display().to_string());
    table
}
