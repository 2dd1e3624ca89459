//! Dummy driver.
//!
//! This is purely for testing. It answers every query with the same scripted
//! output and remembers each invocation.

use super::{modify_args, query_args, DisplayTool, ToolOutput};
use crate::error::Result;
use crate::orientation::Rotation;

use async_std::sync::Mutex;

pub struct DummyTool {
    query_output: ToolOutput,
    modify_output: ToolOutput,
    invocations: Mutex<Vec<Vec<String>>>,
}

impl DummyTool {
    pub fn new(query_output: ToolOutput) -> Self {
        DummyTool {
            query_output,
            modify_output: ToolOutput::ok(""),
            invocations: Mutex::new(vec![]),
        }
    }

    /// A tool whose query succeeds with `stdout`.
    pub fn reporting(stdout: &str) -> Self {
        DummyTool::new(ToolOutput::ok(stdout))
    }

    pub fn with_modify_output(mut self, modify_output: ToolOutput) -> Self {
        self.modify_output = modify_output;
        self
    }

    /// Argument vectors of every call so far, oldest first.
    pub async fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl DisplayTool for DummyTool {
    async fn query(&self) -> Result<ToolOutput> {
        self.invocations.lock().await.push(query_args());
        Ok(self.query_output.clone())
    }

    async fn modify(&self, connector: &str, rotation: Rotation) -> Result<ToolOutput> {
        self.invocations
            .lock()
            .await
            .push(modify_args(connector, rotation));
        Ok(self.modify_output.clone())
    }
}
