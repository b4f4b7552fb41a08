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

/// Typed error conditions of this crate.
///
/// Fallible operations return [`anyhow::Result`]; callers that need to react
/// to a specific condition can downcast to this enum.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stream handed to the logger was already closed at construction
    /// time.
    #[error("destination stream is already closed")]
    DestinationClosed,
    #[error("failed to perform IO action: {0}")]
    Io(#[from] std::io::Error),
}
