// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule bundles: a zip archive holding a manifest and the schedule data.

use std::error::Error;
use std::io::{Cursor, Read, Write};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::{Course, CourseDraft, Schedule, ScheduleDraft};

/// Format tag written to the manifest.
pub const BUNDLE_FORMAT: &str = "classtable-schedule-v1";
/// Latest bundle version this build reads and writes.
pub const BUNDLE_VERSION: u32 = 1;
/// File extension of exported bundles.
pub const BUNDLE_EXTENSION: &str = "ctb";

const MANIFEST_ENTRY: &str = "manifest.json";
const SCHEDULE_ENTRY: &str = "schedule.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub format: String,
    pub version: u32,
    pub app_version: String,
    pub exported_at: Timestamp,
}

/// A schedule and its courses, without identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleBundle {
    pub schedule: ScheduleDraft,
    #[serde(default)]
    pub courses: Vec<CourseDraft>,
}

impl ScheduleBundle {
    pub fn new(schedule: &Schedule, courses: &[Course]) -> Self {
        Self {
            schedule: schedule.to_draft(),
            courses: courses.iter().map(Course::to_draft).collect(),
        }
    }
}

/// Writes the bundle into a zip archive.
pub fn encode(bundle: &ScheduleBundle, exported_at: Timestamp) -> Result<Vec<u8>, Box<dyn Error>> {
    let manifest = Manifest {
        format: BUNDLE_FORMAT.to_string(),
        version: BUNDLE_VERSION,
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at,
    };

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(MANIFEST_ENTRY, opts)
        .map_err(|e| format!("Failed to start manifest entry: {e}"))?;
    let manifest_json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| format!("Failed to serialize manifest: {e}"))?;
    zip.write_all(manifest_json.as_bytes())
        .map_err(|e| format!("Failed to write manifest entry: {e}"))?;

    zip.start_file(SCHEDULE_ENTRY, opts)
        .map_err(|e| format!("Failed to start schedule entry: {e}"))?;
    let schedule_json = serde_json::to_string_pretty(bundle)
        .map_err(|e| format!("Failed to serialize schedule: {e}"))?;
    zip.write_all(schedule_json.as_bytes())
        .map_err(|e| format!("Failed to write schedule entry: {e}"))?;

    let cursor = zip
        .finish()
        .map_err(|e| format!("Failed to finalize bundle: {e}"))?;
    Ok(cursor.into_inner())
}

/// Reads a bundle, rejecting unknown formats and newer versions.
pub fn decode(bytes: &[u8]) -> Result<(Manifest, ScheduleBundle), Box<dyn Error>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("Invalid bundle archive: {e}"))?;

    let manifest_text = read_entry(&mut archive, MANIFEST_ENTRY)?;
    let manifest: Manifest = serde_json::from_str(&manifest_text)
        .map_err(|e| format!("{MANIFEST_ENTRY} is invalid: {e}"))?;
    if manifest.format != BUNDLE_FORMAT {
        return Err(format!("Unsupported bundle format: {}", manifest.format).into());
    }
    if manifest.version > BUNDLE_VERSION {
        return Err(format!(
            "Bundle version {} is newer than the supported version {BUNDLE_VERSION}",
            manifest.version
        )
        .into());
    }

    let schedule_text = read_entry(&mut archive, SCHEDULE_ENTRY)?;
    let bundle: ScheduleBundle = serde_json::from_str(&schedule_text)
        .map_err(|e| format!("{SCHEDULE_ENTRY} is invalid: {e}"))?;

    Ok((manifest, bundle))
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<String, Box<dyn Error>> {
    let mut text = String::new();
    archive
        .by_name(name)
        .map_err(|e| format!("Bundle is missing {name}: {e}"))?
        .read_to_string(&mut text)
        .map_err(|e| format!("Failed to read {name}: {e}"))?;
    Ok(text)
}
