//! Auto-save configuration as delivered by the configuration provider

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Auto-save delays below this make backups of saved documents redundant
pub const AUTO_SAVE_SUPPRESS_THRESHOLD: Duration = Duration::from_millis(1500);

/// Snapshot of the editor's auto-save settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSaveConfiguration {
    /// Delay after the last edit before an automatic save (ms), if configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save_delay_ms: Option<u64>,
}

impl AutoSaveConfiguration {
    pub fn with_delay_ms(delay_ms: u64) -> Self {
        Self {
            auto_save_delay_ms: Some(delay_ms),
        }
    }

    pub fn auto_save_delay(&self) -> Option<Duration> {
        self.auto_save_delay_ms.map(Duration::from_millis)
    }

    /// True when auto-save runs often enough that backups of file-backed
    /// documents are suppressed
    pub fn suppresses_backups(&self) -> bool {
        matches!(self.auto_save_delay(), Some(delay) if delay < AUTO_SAVE_SUPPRESS_THRESHOLD)
    }
}
