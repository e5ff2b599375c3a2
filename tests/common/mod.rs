#![allow(dead_code, unused_imports)]

pub use buildwatch_test_utils::builders;
pub use buildwatch_test_utils::fake_backend::{FakeBackend, Launch};
pub use buildwatch_test_utils::recorders::{RecordingReporter, RecordingWatcher};
pub use buildwatch_test_utils::{init_tracing, with_timeout, TestHarness};

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temporary file with the given extension.
pub fn config_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}
