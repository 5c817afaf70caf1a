//! Tests for generated completions and man page.

use crate::cli::Cli;
use clap::CommandFactory;

#[test]
fn command_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn bash_completions_mention_subcommands() {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    clap_complete::generate(clap_complete::Shell::Bash, &mut cmd, "purl", &mut out);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("sync"));
    assert!(text.contains("import"));
}

#[test]
fn man_page_renders() {
    let mut out = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("purl"));
}
