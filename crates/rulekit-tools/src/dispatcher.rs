//! Target dispatcher that routes each IDE to its integration

use rulekit_meta::{Ide, RuleFile};

use crate::claude::claude_integration;
use crate::codex::codex_integration;
use crate::cursor::CursorIntegration;
use crate::error::Result;
use crate::integration::{ConfigLocation, SyncContext, ToolIntegration};
use crate::windsurf::windsurf_integration;

/// Dispatches writes to the integration for each target IDE.
#[derive(Debug, Default)]
pub struct TargetDispatcher;

impl TargetDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Get the integration for an IDE.
    pub fn integration(&self, ide: Ide) -> Box<dyn ToolIntegration> {
        match ide {
            Ide::Cursor => Box::new(CursorIntegration::new()),
            Ide::Windsurf => Box::new(windsurf_integration()),
            Ide::Codex => Box::new(codex_integration()),
            Ide::Claude => Box::new(claude_integration()),
        }
    }

    /// Write `rules` to every target, in order.
    ///
    /// Stops at the first failing target. Returns the targets written.
    pub fn sync_all(
        &self,
        context: &SyncContext,
        targets: &[Ide],
        rules: &[RuleFile],
    ) -> Result<Vec<Ide>> {
        let mut synced = Vec::with_capacity(targets.len());
        for &ide in targets {
            tracing::debug!(target_ide = %ide, root = %context.root, "writing target");
            self.integration(ide).sync(context, rules)?;
            synced.push(ide);
        }
        Ok(synced)
    }

    /// Locations the given targets would write, without touching the disk.
    ///
    /// Locations shared by several targets are listed once, under the first.
    pub fn planned_locations(&self, targets: &[Ide]) -> Vec<(Ide, ConfigLocation)> {
        let mut planned: Vec<(Ide, ConfigLocation)> = Vec::new();
        for &ide in targets {
            for location in self.integration(ide).config_locations() {
                if !planned.iter().any(|(_, seen)| seen.path == location.path) {
                    planned.push((ide, location));
                }
            }
        }
        planned
    }

    pub fn list_available(&self) -> Vec<Ide> {
        Ide::ALL.to_vec()
    }
}
