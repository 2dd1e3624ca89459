//! # Display rotation controller
//!
//! One activation is a strictly sequential query, decide and apply cycle.
//! Nothing is remembered between activations except what the display tool
//! reports.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::devices::DisplayTool;
use crate::error::{Error, Result};
use crate::orientation::Rotation;
use crate::query::{parse_query_output, DisplayQueryResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RotationCommand {
    RotateRight(String),
    RotateToNormal(String),
}

impl RotationCommand {
    pub fn connector(&self) -> &str {
        match self {
            Self::RotateRight(connector) | Self::RotateToNormal(connector) => connector,
        }
    }

    pub fn target(&self) -> Rotation {
        match self {
            Self::RotateRight(_) => Rotation::Right,
            Self::RotateToNormal(_) => Rotation::Normal,
        }
    }
}

/// What a single activation ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Rotated(RotationCommand),
    /// The display was left alone, e.g. because it is not built in.
    Unchanged,
    Failed(String),
    /// Another activation was still in flight.
    Busy,
}

/// Pick the command for the observed state. `None` means leave the display
/// alone.
pub fn decide(state: &DisplayQueryResult) -> Option<RotationCommand> {
    if !state.is_internal_display {
        tracing::info!("display is not built in, leaving it alone");
        return None;
    }
    if state.connector_name.is_empty() {
        tracing::warn!("built-in display reported without a known connector");
        return None;
    }

    let connector = state.connector_name.clone();
    Some(match Rotation::toggled(state.rotation) {
        Rotation::Right => RotationCommand::RotateRight(connector),
        _ => RotationCommand::RotateToNormal(connector),
    })
}

pub struct DisplayRotationController<T> {
    tool: T,
    busy: AtomicBool,
}

/// Clears the busy flag when the cycle ends, however it ends.
struct CycleGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

impl<T: DisplayTool> DisplayRotationController<T> {
    pub fn new(tool: T) -> Self {
        DisplayRotationController {
            tool,
            busy: AtomicBool::new(false),
        }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Run the query command and parse what it prints.
    pub async fn query_state(&self) -> Result<DisplayQueryResult> {
        let output = self.tool.query().await?;
        if !output.success {
            return Err(Error::QueryFailed(output.stderr.trim_end().to_owned()));
        }

        tracing::debug!("query output:\n{}", output.stdout);
        let state = parse_query_output(&output.stdout);
        tracing::info!(
            "rotation: {:?}, built in: {}, connector: {:?}",
            state.raw_rotation,
            state.is_internal_display,
            state.connector_name
        );
        Ok(state)
    }

    /// Run the modify command for `command`. The outcome is only logged; a
    /// failing modify is not an error and is never retried.
    pub async fn apply(&self, command: Option<&RotationCommand>) -> Result<()> {
        let command = match command {
            Some(command) => command,
            None => return Ok(()),
        };

        tracing::info!("rotating {} to {}", command.connector(), command.target());
        let output = self
            .tool
            .modify(command.connector(), command.target())
            .await?;
        if !output.stdout.is_empty() {
            tracing::info!("modify stdout: {}", output.stdout.trim_end());
        }
        if !output.stderr.is_empty() {
            tracing::info!("modify stderr: {}", output.stderr.trim_end());
        }
        if !output.success {
            tracing::warn!("modify command exited unsuccessfully");
        }
        Ok(())
    }

    /// Handle one activation. Errors are logged and swallowed.
    pub async fn toggle(&self) -> CycleOutcome {
        let _guard = match self.try_begin() {
            Some(guard) => guard,
            None => {
                tracing::info!("rotation already in progress, ignoring activation");
                return CycleOutcome::Busy;
            }
        };

        match self.run_cycle().await {
            Ok(Some(command)) => CycleOutcome::Rotated(command),
            Ok(None) => CycleOutcome::Unchanged,
            Err(e) => {
                tracing::error!("rotation toggle failed: {}", e);
                CycleOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run_cycle(&self) -> Result<Option<RotationCommand>> {
        let state = self.query_state().await?;
        let command = decide(&state);
        self.apply(command.as_ref()).await?;
        Ok(command)
    }

    fn try_begin(&self) -> Option<CycleGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| CycleGuard { busy: &self.busy })
    }
}
