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

//! Rotolog is a configurable line-oriented logger: leveled calls are
//! rendered into formatted text lines through a placeholder template and
//! written to a fixed stream or to a file rotated by a time-based naming
//! pattern.
//!
//! # Overview
//!
//! Severity runs from `UNKNOWN` (ordinal 0, always emitted) down to `TRACE`
//! (ordinal 6): a record passes the gate when its ordinal is less than or
//! equal to the configured level's. Each emitted line is rendered through a
//! template of `%<key>` placeholders (`%m` message, `%L` level name, `%d{fmt}`
//! timestamp, and so on), then written with a trailing newline. File
//! destinations reopen transparently whenever the filename format renders to
//! a new name, so a process spanning midnight rolls to the next day's file
//! without a restart.
//!
//! # Examples
//!
//! Simple setup over stdout:
//!
//! ```
//! use rotolog::Logger;
//! use rotolog::Stdout;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut logger = Logger::from_stream(Stdout)?;
//! logger.info("This is an info message.")?;
//! # Ok(())
//! # }
//! ```
//!
//! Daily-rotated file with a custom level and line format:
//!
//! ```
//! use rotolog::Logger;
//!
//! # fn main() -> anyhow::Result<()> {
//! # let dir = tempfile::tempdir()?;
//! let format = dir.path().join("server-%Y-%m-%d.log");
//!
//! let mut logger = Logger::rolling(format.display().to_string())?
//!     .with_level("DEBUG")
//!     .with_log_format("%d{%H:%M:%S} [%L] %m (%c)");
//!
//! logger.warn("disk usage above 90%")?;
//! logger.debug("retrying in 5s")?;
//! logger.close();
//! # Ok(())
//! # }
//! ```

mod clock;
mod context;
mod error;
mod level;
mod logger;
mod rolling;
mod stream;
mod template;

pub use context::ErrorContext;
pub use error::Error;
pub use level::Level;
pub use level::LevelSpec;
pub use logger::DEFAULT_LOG_FORMAT;
pub use logger::Logger;
pub use stream::Stderr;
pub use stream::Stdout;
pub use stream::Stream;
