#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tunables::adapters::config_file::ConfigFile;
use tunables::adapters::error_sink::RecordingErrorSink;

/// Scratch directory holding one parameter file.
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
    pub sink: Arc<RecordingErrorSink>,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.conf");
        Self {
            dir,
            path,
            sink: Arc::new(RecordingErrorSink::new()),
        }
    }

    pub fn with_content(content: &str) -> Self {
        let fixture = Self::new();
        fs::write(&fixture.path, content).unwrap();
        fixture
    }

    /// A fresh instance over the fixture file, sharing the recording sink.
    pub fn config(&self) -> ConfigFile {
        ConfigFile::with_sink(&self.path, self.sink.clone())
    }

    pub fn loaded(&self) -> ConfigFile {
        let mut config = self.config();
        config.load().unwrap();
        config
    }

    pub fn read(&self) -> String {
        fs::read_to_string(&self.path).unwrap()
    }
}

/// Assert the store holds exactly `expected`, no more and no fewer.
pub fn assert_entries(config: &ConfigFile, expected: &[(&str, &str)]) {
    let mut actual: Vec<(&str, &str)> = config.entries().collect();
    let mut expected = expected.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected);
}

pub const EXAMPLE_FILE: &str = "\
# Example parameter file
# lines starting with '#' are comments

RandomVariable = 45   # should be an int
startBatteryVoltage = 3.7
messageToShow = HelloYouSucker
";

pub const MIXED_FILE: &str = "\
a=3456.32552
   b  =   2   # spaced out
c = -24.567
#GOOD_ADAAG = nope
GOOD_ADAAG = bob
";
