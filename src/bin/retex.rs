//! Command-line interface for retex
//! This binary rewrites LaTeX math markup using replacement rule documents.
//!
//! Usage:
//!   retex convert `<path>` [--rules `<file>`] [--output `<file>`]  - Rewrite a file (or stdin with `-`)
//!   retex rules [--format `<format>`]                          - Print the built-in rules
//!   retex check `<path>`                                         - Validate a rule file

use clap::{Arg, Command};
use std::io::Read;

use retex::processor::{entry, entry_with_rules, rules_to_json};
use retex::rules::{default_rule_set, parse_rules};

fn main() {
    let matches = Command::new("retex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for rewriting LaTeX math markup with replacement rules")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("convert")
                .about("Rewrite a source file, or stdin with `-`")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file, or `-` for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("rules")
                        .long("rules")
                        .short('r')
                        .help("Path to a replacement rule file (defaults to the built-in rules)"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the result to a file instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("Print the built-in replacement rules")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('text' or 'json')")
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("check").about("Validate a replacement rule file").arg(
                Arg::new("path")
                    .help("Path to the rule file to validate")
                    .required(true)
                    .index(1),
            ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("convert", convert_matches)) => {
            let path = convert_matches.get_one::<String>("path").unwrap();
            let rules = convert_matches.get_one::<String>("rules");
            let output = convert_matches.get_one::<String>("output");
            handle_convert_command(path, rules.map(String::as_str), output.map(String::as_str));
        }
        Some(("rules", rules_matches)) => {
            let format = rules_matches.get_one::<String>("format").unwrap();
            handle_rules_command(format);
        }
        Some(("check", check_matches)) => {
            let path = check_matches.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

/// Handle the convert command
fn handle_convert_command(path: &str, rules_path: Option<&str>, output_path: Option<&str>) {
    let source = read_source(path);

    let result = match rules_path {
        Some(rules_path) => {
            let rules_text = std::fs::read_to_string(rules_path).unwrap_or_else(|e| {
                eprintln!("Error reading rule file: {}", e);
                std::process::exit(1);
            });
            entry_with_rules(&source, &rules_text)
        }
        None => entry(&source),
    };

    let converted = result.unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match output_path {
        Some(output_path) => {
            std::fs::write(output_path, converted).unwrap_or_else(|e| {
                eprintln!("Error writing output file: {}", e);
                std::process::exit(1);
            });
        }
        None => print!("{}", converted),
    }
}

/// Handle the rules command
fn handle_rules_command(format: &str) {
    match format {
        "text" => print!("{}", retex::default_replace_rules()),
        "json" => {
            let json = rules_to_json(default_rule_set()).unwrap_or_else(|e| {
                eprintln!("Error serializing rules: {}", e);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        other => {
            eprintln!("Unknown format '{}': expected 'text' or 'json'", other);
            std::process::exit(1);
        }
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let rules_text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    match parse_rules(&rules_text) {
        Ok(set) => println!("{}: {} rules ok", path, set.len()),
        Err(e) => {
            eprintln!("{}: {}", path, e);
            std::process::exit(1);
        }
    }
}

/// Read source text from a file, or from stdin when the path is `-`
fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
            eprintln!("Error reading stdin: {}", e);
            std::process::exit(1);
        });
        source
    } else {
        std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        })
    }
}
