use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only needs clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

/// Man pages land in `$OUT_DIR/man`, completion scripts in
/// `$OUT_DIR/completions`, for packagers to pick up.
fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR").map(PathBuf::from) else {
        panic!("OUT_DIR not set by Cargo");
    };

    let mut cmd = cli::Cli::command();
    cmd.build();

    let man_dir = out_dir.join("man");
    create_dir(&man_dir);
    write_manpages(&cmd, "lbctl", &man_dir);

    let completions_dir = out_dir.join("completions");
    create_dir(&completions_dir);
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
        clap_complete::generate_to(shell, &mut cmd, "lbctl", &completions_dir)
            .unwrap_or_else(|e| panic!("failed to generate {shell} completions: {e}"));
    }
}

fn create_dir(dir: &Path) {
    fs::create_dir_all(dir).unwrap_or_else(|e| panic!("failed to create {}: {e}", dir.display()));
}

/// One page per visible command, named `lbctl-loadbalancer-acl-condition.1` etc.
fn write_manpages(cmd: &clap::Command, page: &str, dir: &Path) {
    let path = dir.join(format!("{page}.1"));
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone().name(page.to_owned()))
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("failed to render {page}: {e}"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        write_manpages(sub, &format!("{page}-{}", sub.get_name()), dir);
    }
}
