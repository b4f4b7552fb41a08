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

//! Time-based file rotation driven by a filename format.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use jiff::Zoned;
use jiff::fmt::strtime;

/// State for a rotating file destination.
///
/// The active file is derived by rendering the filename format against the
/// current time. A rotation boundary is crossed only when the rendered name
/// changes or the current file disappeared from disk; everything else reuses
/// the open handle.
#[derive(Debug)]
pub(crate) struct RollingFile {
    format: String,
    current: Option<OpenFile>,
}

#[derive(Debug)]
struct OpenFile {
    path: PathBuf,
    file: File,
}

impl RollingFile {
    pub(crate) fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            current: None,
        }
    }

    pub(crate) fn format(&self) -> &str {
        &self.format
    }

    #[cfg(test)]
    pub(crate) fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|open| open.path.as_path())
    }

    /// Renders the filename for `now` and reopens the handle if the name
    /// changed or the file went missing. Returns the writable handle.
    pub(crate) fn ensure_open(&mut self, now: &Zoned) -> anyhow::Result<&mut File> {
        let path = PathBuf::from(render_filename(&self.format, now)?);
        let reuse = matches!(
            &self.current,
            Some(open) if open.path == path && open.path.exists()
        );
        if !reuse {
            // Drop the previous handle before opening the next file.
            self.current = None;
            let file = open_log_file(&path)?;
            self.current = Some(OpenFile { path, file });
        }
        Ok(&mut self.current.as_mut().unwrap().file)
    }

    /// Drops the current handle, if any. The next write reopens through
    /// [`ensure_open`](Self::ensure_open).
    pub(crate) fn close(&mut self) {
        self.current = None;
    }
}

fn render_filename(format: &str, now: &Zoned) -> anyhow::Result<String> {
    strtime::format(format, now)
        .with_context(|| format!("failed to render filename format {format:?}"))
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).context("failed to create log directory")?;
        }
    }
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;

    fn zoned(s: &str) -> Zoned {
        Zoned::from_str(s).unwrap()
    }

    #[test]
    fn test_render_filename() {
        let now = zoned("2024-08-10T17:12:52[UTC]");
        assert_eq!(
            render_filename("log-%Y-%m-%d.txt", &now).unwrap(),
            "log-2024-08-10.txt"
        );
        assert_eq!(render_filename("static.log", &now).unwrap(), "static.log");
    }

    #[test]
    fn test_same_name_reuses_handle() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let format = temp_dir.path().join("log-%Y-%m-%d.txt");
        let mut rolling = RollingFile::new(format.display().to_string());

        let morning = zoned("2024-08-10T08:00:00[UTC]");
        rolling.ensure_open(&morning).unwrap();
        let first = rolling.current_path().unwrap().to_path_buf();

        let evening = zoned("2024-08-10T20:00:00[UTC]");
        rolling.ensure_open(&evening).unwrap();
        assert_eq!(rolling.current_path().unwrap(), first);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_name_change_opens_new_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let format = temp_dir.path().join("log-%Y-%m-%d.txt");
        let mut rolling = RollingFile::new(format.display().to_string());

        rolling.ensure_open(&zoned("2024-08-10T23:59:59[UTC]")).unwrap();
        let first = rolling.current_path().unwrap().to_path_buf();

        rolling.ensure_open(&zoned("2024-08-11T00:00:01[UTC]")).unwrap();
        let second = rolling.current_path().unwrap().to_path_buf();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_missing_file_is_recreated() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let format = temp_dir.path().join("app.log");
        let mut rolling = RollingFile::new(format.display().to_string());

        let now = zoned("2024-08-10T08:00:00[UTC]");
        rolling.ensure_open(&now).unwrap();
        let path = rolling.current_path().unwrap().to_path_buf();

        fs::remove_file(&path).unwrap();
        rolling.ensure_open(&now).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_close_is_idempotent() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let format = temp_dir.path().join("app.log");
        let mut rolling = RollingFile::new(format.display().to_string());

        rolling.ensure_open(&zoned("2024-08-10T08:00:00[UTC]")).unwrap();
        rolling.close();
        rolling.close();
        assert!(rolling.current_path().is_none());
    }
}
