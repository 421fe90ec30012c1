// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker list import and export.
//!
//! This module handles exporting and importing marker lists in YAML
//! and JSON formats. The file layout matches the storage slot: a plain
//! array of markers.

use crate::models::marker::Marker;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Supported exchange formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            other => Err(anyhow!("Unsupported file extension: {:?}", other)),
        }
    }
}

/// Export in the format implied by the file extension.
pub fn export(markers: &[Marker], path: &Path) -> Result<()> {
    let text = match Format::from_path(path)? {
        Format::Json => serde_json::to_string_pretty(markers)?,
        Format::Yaml => serde_yaml::to_string(markers)?,
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// Import in the format implied by the file extension.
pub fn import(path: &Path) -> Result<Vec<Marker>> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let markers = match format {
        Format::Json => serde_json::from_str(&text)?,
        Format::Yaml => serde_yaml::from_str(&text)?,
    };
    Ok(markers)
}
