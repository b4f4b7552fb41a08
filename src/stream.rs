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

//! Fixed stream destinations.

use std::fmt;
use std::io;
use std::io::Write;

/// A fixed, non-rotating log destination.
///
/// The logger writes through the stream as-is. It never closes a stream it
/// was given: [`Logger::close`](crate::Logger::close) is a no-op for stream
/// destinations, so the handle stays usable by its owner.
pub trait Stream: Write + fmt::Debug + Send {
    /// Whether the stream can no longer accept writes. A logger refuses to
    /// be constructed over a stream that is already closed.
    fn is_closed(&self) -> bool {
        false
    }
}

/// A stream that prints log lines to stdout.
#[derive(Debug, Default)]
pub struct Stdout;

impl Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

impl Stream for Stdout {}

/// A stream that prints log lines to stderr.
#[derive(Debug, Default)]
pub struct Stderr;

impl Write for Stderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl Stream for Stderr {}

/// A caller-owned file handle used as a fixed destination. Unlike a rotating
/// destination the logger never reopens or closes it.
impl Stream for std::fs::File {}
