// SPDX-FileCopyrightText: 2025-2026 Classtable Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use classtable_core::APP_NAME;
use clap::{ArgMatches, Command, arg, crate_version};
use colored::Colorize;

const LICENSE: &str = "\
Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.";

#[derive(Debug, Clone, Copy)]
pub struct CmdAbout {
    pub license: bool,
}

impl CmdAbout {
    pub const NAME: &str = "about";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show version and license information")
            .arg(arg!(--license "Print the full license notice"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            license: matches.get_flag("license"),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(license = self.license, "showing about...");
        println!("{}", self.summary());
        if self.license {
            println!();
            println!("{LICENSE}");
        }
        Ok(())
    }

    fn summary(&self) -> String {
        format!(
            "{} {}\n{}\nCopyright 2025-2026 Classtable Developers, Apache-2.0",
            APP_NAME.bold(),
            crate_version!(),
            "Keep your weekly class schedule in the terminal."
        )
    }
}
