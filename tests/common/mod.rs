//! Shared test fixtures

#![allow(dead_code)]

pub mod mock_platform;

pub use mock_platform::{MergeBehavior, MockPlatformService};

use chrono::NaiveDate;
use merge_down::actions::ActionOutput;
use merge_down::error::Result;
use merge_down::sync::SyncRequest;
use merge_down::types::{DEFAULT_API_URL, PlatformConfig};
use std::sync::Mutex;

/// Config for the `test/repo` repository on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test".to_string(),
        repo: "repo".to_string(),
        api_url: DEFAULT_API_URL.to_string(),
    }
}

/// Sync request for `head` into `base` on 2024-03-07
pub fn make_request(base: &str, head: &str) -> SyncRequest {
    SyncRequest {
        base: base.to_string(),
        head: head.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
    }
}

/// Output sink that records every call
#[derive(Default)]
pub struct RecordingOutput {
    outputs: Mutex<Vec<(String, String)>>,
    failures: Mutex<Vec<String>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        self.outputs.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    /// The single `result` output; panics unless exactly one was set
    pub fn result(&self) -> String {
        let outputs = self.outputs();
        assert_eq!(outputs.len(), 1, "expected exactly one output: {outputs:?}");
        assert_eq!(outputs[0].0, "result");
        outputs[0].1.clone()
    }
}

impl ActionOutput for RecordingOutput {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.outputs
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_failed(&self, message: &str) -> Result<()> {
        self.failures.lock().unwrap().push(message.to_string());
        Ok(())
    }
}
