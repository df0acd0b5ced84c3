//! Build script for generating the `vvctl` man pages.
//!
//! Packaging picks the pages up from the build output directory: `vvctl.1`
//! for the top-level command and `vvctl-<group>.1` for each command group.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

fn render(man: Man, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    let mut file = File::create(path)?;
    file.write_all(&buffer)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo:rerun-if-changed=src/cli/mod.rs")?;

    let out_dir =
        PathBuf::from(env::var_os("OUT_DIR").ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "OUT_DIR was not set")
        })?);

    let command = Cli::command();
    for group in command.get_subcommands() {
        let name = format!("vvctl-{}", group.get_name());
        let path = out_dir.join(format!("{name}.1"));
        render(Man::new(group.clone()).title(name), &path)?;
    }
    render(Man::new(command), &out_dir.join("vvctl.1"))?;

    Ok(())
}
