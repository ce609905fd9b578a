// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the classtable-core crate.
//!
//! These tests open a real on-disk datastore and run multi-step workflows
//! through the public `ClassTable` handle.

mod bundle_exchange;
mod config_driven;
mod course_conflicts;
mod schedule_lifecycle;
