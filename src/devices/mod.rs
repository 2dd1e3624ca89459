//! Display tools.
//!
//! A display tool is whatever answers `query` and performs `modify` for us.
//! In practice that is the `gnome-randr` binary; the dummy tool stands in for
//! it in tests and dry runs.

pub mod dummy;
pub mod gnome_randr;

use crate::error::Result;
use crate::orientation::Rotation;

/// Captured result of one tool invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        ToolOutput {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        ToolOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Arguments of the query invocation.
pub fn query_args() -> Vec<String> {
    vec!["query".to_owned()]
}

/// Arguments of the modify invocation for `connector`.
pub fn modify_args(connector: &str, rotation: Rotation) -> Vec<String> {
    vec![
        "modify".to_owned(),
        connector.to_owned(),
        "--persistent".to_owned(),
        "--rotate".to_owned(),
        rotation.as_arg().to_owned(),
    ]
}

#[async_trait::async_trait]
pub trait DisplayTool: Send + Sync {
    /// Report the current display configuration.
    async fn query(&self) -> Result<ToolOutput>;

    /// Persistently rotate `connector`.
    async fn modify(&self, connector: &str, rotation: Rotation) -> Result<ToolOutput>;
}

/// Wraps a tool so that queries run for real while modifications are only
/// logged.
pub struct DryRun<T> {
    inner: T,
}

impl<T: DisplayTool> DryRun<T> {
    pub fn new(inner: T) -> Self {
        DryRun { inner }
    }
}

#[async_trait::async_trait]
impl<T: DisplayTool> DisplayTool for DryRun<T> {
    async fn query(&self) -> Result<ToolOutput> {
        self.inner.query().await
    }

    async fn modify(&self, connector: &str, rotation: Rotation) -> Result<ToolOutput> {
        tracing::info!(
            "dry run, not executing: modify {}",
            modify_args(connector, rotation)[1..].join(" ")
        );
        Ok(ToolOutput::ok(""))
    }
}

#[cfg(test)]
mod tests {
    use super::dummy::DummyTool;
    use super::*;

    #[async_std::test]
    async fn dry_run_only_queries() -> Result<()> {
        let tool = DryRun::new(DummyTool::reporting("rotation: left"));
        assert_eq!(tool.query().await?.stdout, "rotation: left");
        assert!(tool.modify("eDP-1", Rotation::Normal).await?.success);

        assert_eq!(tool.inner.invocations().await, vec![query_args()]);
        Ok(())
    }

    #[test]
    fn modify_argument_vector() {
        assert_eq!(
            modify_args("eDP-1", Rotation::Right),
            vec!["modify", "eDP-1", "--persistent", "--rotate", "right"]
        );
    }
}
