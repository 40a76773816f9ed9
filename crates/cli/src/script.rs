//! Replay scripts
//!
//! A script is a TOML list of editor actions:
//!
//! ```toml
//! [[step]]
//! action = "open"
//! resource = "file:///notes.md"
//! content = "hello"
//!
//! [[step]]
//! action = "edit"
//! resource = "file:///notes.md"
//! content = "hello world"
//!
//! [[step]]
//! action = "wait"
//! ms = 1200
//! ```

use anyhow::{Context, Result};
use salvage_core::Resource;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Open a file-backed document with saved content
    Open {
        resource: Resource,
        #[serde(default)]
        content: String,
    },
    /// Create an untitled document
    NewUntitled {
        resource: Resource,
        #[serde(default)]
        content: String,
    },
    /// Replace a document's content
    Edit { resource: Resource, content: String },
    Save { resource: Resource },
    Revert { resource: Resource },
    Close { resource: Resource },
    /// Change the auto-save delay; omit `ms` to turn it off
    SetAutoSaveDelay {
        #[serde(default)]
        ms: Option<u64>,
    },
    /// Let time pass
    Wait { ms: u64 },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let script: Script = toml::from_str(text).context("Failed to parse replay script")?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid script {}", path.display()))
    }
}
