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

use std::fs;

use rand::Rng;
use rand::distr::Alphanumeric;
use rotolog::ErrorContext;
use rotolog::Level;
use rotolog::Logger;
use tempfile::TempDir;

fn generate_random_string() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(50..=100);
    std::iter::repeat(())
        .map(|()| rng.sample(Alphanumeric))
        .map(char::from)
        .take(len)
        .collect()
}

#[test]
fn test_leveled_writes_end_to_end() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_level(Level::Debug)
        .with_log_format("%L %m");

    logger.info("started").unwrap();
    logger.debug("details").unwrap();
    logger.trace("dropped").unwrap();
    logger.close();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "INFO started\nDEBUG details\n"
    );
}

#[test]
fn test_default_format_lines() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string()).unwrap();
    logger.warn("first").unwrap();
    logger.error("second").unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines = contents.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\tWARN\tfirst"), "got {:?}", lines[0]);
    assert!(lines[1].contains("\tERROR\tsecond"), "got {:?}", lines[1]);
}

#[test]
fn test_random_payload_passes_through_verbatim() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_log_format("%m");

    let mut expected = String::new();
    for _ in 0..20 {
        let payload = generate_random_string();
        logger.info(&payload).unwrap();
        expected.push_str(&payload);
        expected.push('\n');
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_plain_and_multi_through_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_log_format("%m{upcase}");

    logger.multi(Level::Info, ["a", "b"]).unwrap();
    logger.multi(Level::Debug, ["dropped"]).unwrap();
    logger.plain("raw %m").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "A\nB\nraw %m\n");
}

#[test]
fn test_error_context_in_rendered_lines() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_log_format("%m: %e%S{\n\t}");
    logger.set_error_context(
        ErrorContext::new("connection reset").with_backtrace(["io.rs:88", "client.rs:42"]),
    );
    logger.error("request failed").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "request failed: connection reset\n\tio.rs:88\n\tclient.rs:42\n"
    );
}

#[test]
fn test_externally_deleted_file_is_recreated() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_log_format("%m");
    logger.info("kept in first file").unwrap();

    fs::remove_file(&path).unwrap();
    logger.info("kept in second file").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "kept in second file\n"
    );
}

#[test]
fn test_close_reopen_cycle() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_log_format("%m");
    logger.info("first").unwrap();
    logger.close();
    logger.close();
    logger.info("second").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
}

#[test]
fn test_caller_owned_file_as_stream_destination() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("handed-over.log");
    let file = fs::File::create(&path).unwrap();

    let mut logger = Logger::from_stream(file)
        .unwrap()
        .with_log_format("%L %m");
    assert_eq!(logger.file_format(), None);

    logger.info("over a stream").unwrap();
    // close() does not touch a handle the logger was given.
    logger.close();
    logger.info("still writable").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "INFO over a stream\nINFO still writable\n"
    );
}

#[test]
fn test_level_reconfiguration_by_name_and_ordinal() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let path = temp_dir.path().join("app.log");

    let mut logger = Logger::rolling(path.display().to_string())
        .unwrap()
        .with_log_format("%m");

    logger.set_level("TRACE");
    logger.trace("one").unwrap();

    logger.set_level(2);
    logger.warn("dropped").unwrap();
    logger.error("two").unwrap();

    logger.set_level("BOGUS");
    assert_eq!(logger.level(), Level::Unknown);
    logger.fatal("dropped").unwrap();
    logger.always("three").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
}
