// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

fn main() {
    // rebuild when a migration is added so `sqlx::migrate!` picks it up
    println!("cargo:rerun-if-changed=src/localdb/migrations");
}
