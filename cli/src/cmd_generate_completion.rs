// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::{Generator, generate};
use clap_complete_nushell::Nushell;

use crate::Cli;
use crate::config::APP_NAME;

/// Prints a completion script for `schedcal` and its conversion commands.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a shell completion script for schedcal")
            .hide(true)
            .arg(
                arg!(shell: <SHELL> "Shell to generate the completion script for")
                    .value_parser(value_parser!(Shell)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let shell = matches
            .get_one::<Shell>("shell")
            .copied()
            .ok_or("No shell given for completion")?;
        Ok(Self { shell })
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(shell = ?self.shell, "generating shell completion...");
        self.generate(&mut io::stdout().lock());
        Ok(())
    }

    pub fn generate(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as ClapShell;

        match self.shell {
            Shell::Bash => write_script(ClapShell::Bash, buf),
            Shell::Elvish => write_script(ClapShell::Elvish, buf),
            Shell::Fish => write_script(ClapShell::Fish, buf),
            Shell::PowerShell => write_script(ClapShell::PowerShell, buf),
            Shell::Zsh => write_script(ClapShell::Zsh, buf),
            Shell::Nushell => write_script(Nushell, buf),
        }
    }
}

fn write_script(generator: impl Generator, buf: &mut impl io::Write) {
    generate(generator, &mut Cli::command(), APP_NAME, buf);
}

/// Shells with a completion generator.
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[value(name = "powershell")]
    PowerShell,
    Zsh,
}
