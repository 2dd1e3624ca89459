//! gnome-randr driver.
//!
//! Runs the tool as a child process and captures both output streams.

use super::{modify_args, query_args, DisplayTool, ToolOutput};
use crate::error::Result;
use crate::orientation::Rotation;

use async_std::process::Command;

pub const DEFAULT_PROGRAM: &str = "gnome-randr";

pub struct GnomeRandr {
    program: String,
}

impl GnomeRandr {
    pub fn new(program: impl Into<String>) -> Self {
        GnomeRandr {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[String]) -> Result<ToolOutput> {
        tracing::debug!("running {} {}", self.program, args.join(" "));
        let output = Command::new(&self.program).args(args).output().await?;
        Ok(ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for GnomeRandr {
    fn default() -> Self {
        GnomeRandr::new(DEFAULT_PROGRAM)
    }
}

#[async_trait::async_trait]
impl DisplayTool for GnomeRandr {
    async fn query(&self) -> Result<ToolOutput> {
        self.run(&query_args()).await
    }

    async fn modify(&self, connector: &str, rotation: Rotation) -> Result<ToolOutput> {
        self.run(&modify_args(connector, rotation)).await
    }
}
