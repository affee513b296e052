//! Command-line interface for toml-reader
//!
//! Usage:
//!   toml-reader read `<path>` [--format `<json|yaml>`] [--full]  - Print the document tree
//!   toml-reader check `<path>`                                 - Validate, reporting diagnostics

use clap::{Arg, ArgAction, Command};
use std::fs;

use toml_reader::{read_toml, DocTree};

fn main() {
    let matches = Command::new("toml-reader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A reader for the TOML format")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("read")
                .about("Parse a TOML file and print its document tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the TOML file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('json' or 'yaml')")
                        .default_value("json"),
                )
                .arg(
                    Arg::new("full")
                        .long("full")
                        .help("Keep kind tags and source images on every leaf")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a TOML file, printing diagnostics")
                .arg(
                    Arg::new("path")
                        .help("Path to the TOML file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("read", read_matches)) => {
            let path = read_matches.get_one::<String>("path").unwrap();
            let format = read_matches.get_one::<String>("format").unwrap();
            let full = read_matches.get_flag("full");
            handle_read_command(path, format, full);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Handle the read command
fn handle_read_command(path: &str, format: &str, full: bool) {
    let text = read_file(path);
    let outcome = read_toml(&text, full);
    let Some(tree) = outcome.result else {
        for error in &outcome.errors {
            eprintln!("{}: {}", path, error);
        }
        std::process::exit(1);
    };

    let rendered = match (&tree, format) {
        (DocTree::Full(node), "yaml") => serde_yaml::to_string(node).map_err(|e| e.to_string()),
        (DocTree::Full(node), _) => {
            serde_json::to_string_pretty(node).map_err(|e| e.to_string())
        }
        (DocTree::Plain(value), "yaml") => {
            serde_yaml::to_string(value).map_err(|e| e.to_string())
        }
        (DocTree::Plain(value), _) => {
            serde_json::to_string_pretty(value).map_err(|e| e.to_string())
        }
    };
    match rendered {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let text = read_file(path);
    let outcome = read_toml(&text, false);
    if outcome.is_ok() {
        println!("{}: OK", path);
    } else {
        for error in &outcome.errors {
            eprintln!("{}: {}", path, error);
        }
        std::process::exit(1);
    }
}
