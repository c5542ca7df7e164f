// Command-line interface for makehtml
//
// Converts a Word document into an HTML fragment. The conversion itself lives in the makehtml
// library; this binary only deals with the shell: arguments, configuration lookup, file I/O and
// exit codes.
//
// Usage:
//  makehtml <input.docx>                       - Writes <input>.html next to the input
//  makehtml <input.docx> -o <output.html>      - Explicit output path
//  makehtml <input.docx> -c <config.json>      - Explicit configuration file
//
// Configuration lookup:
//
// An explicit --config file is layered over the built-in defaults; when it does not exist a
// warning is printed and the defaults are used. Without --config, the per-user file
// (<config dir>/makehtml/config.json) is used when present, and created from the defaults
// otherwise.
//
// Library diagnostics (dropped hyperlink fields, list flushes) are logged; set
// RUST_LOG=makehtml=debug to see them.

use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use makehtml::{convert_docx_file, DocxFormat, Format, FormattingRules};
use makehtml_config::{user_config_path, write_default_config, Loader, MakeHtmlConfig};
use std::fs;
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    Command::new("makehtml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert DOCX files to clean HTML with configurable formatting")
        .long_about(
            "makehtml converts Word documents (.docx) to clean HTML.\n\n\
            Headings, paragraphs, nested lists, tables, bold/italic/underline and hyperlinks\n\
            are preserved. Output tags, quote wrapping, special characters and search/replace\n\
            rules come from the configuration file.\n\n\
            Examples:\n  \
            makehtml report.docx                    # Writes report.html\n  \
            makehtml report.docx -o out/report.html # Explicit output path\n  \
            makehtml report.docx -c config.json     # Explicit configuration",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to input DOCX file")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Path to output HTML file (default: input with .html extension)")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to configuration file, JSON or TOML (default: per-user config.json)")
                .value_hint(ValueHint::FilePath),
        )
}

fn main() {
    let _ = env_logger::builder()
        .filter_module("makehtml", LevelFilter::Warn)
        .filter_module("makehtml_config", LevelFilter::Warn)
        .parse_default_env()
        .try_init();

    let matches = build_cli().get_matches();
    let input = PathBuf::from(
        matches
            .get_one::<String>("input")
            .expect("input is required"),
    );

    if let Err(message) = validate_input(&input) {
        eprintln!("Error: {message}");
        std::process::exit(1);
    }

    let output = output_path(&input, &matches);
    let config = load_cli_config(matches.get_one::<String>("config").map(Path::new));
    let rules = FormattingRules::from(&config);

    handle_convert_command(&input, &output, &rules);
}

fn handle_convert_command(input: &Path, output: &Path, rules: &FormattingRules) {
    println!("Converting {} to HTML...", input.display());

    let html = convert_docx_file(input, rules).unwrap_or_else(|e| {
        eprintln!("Error during conversion: {e}");
        std::process::exit(1);
    });

    fs::write(output, html).unwrap_or_else(|e| {
        eprintln!("Error writing file '{}': {e}", output.display());
        std::process::exit(1);
    });

    println!("Successfully converted to {}", output.display());
}

/// The input must exist and carry a `.docx` extension (any case).
fn validate_input(input: &Path) -> Result<(), String> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()));
    }
    if !DocxFormat.matches_path(input) {
        return Err(format!("Input file must be a .{} file", DocxFormat.name()));
    }
    Ok(())
}

fn output_path(input: &Path, matches: &ArgMatches) -> PathBuf {
    match matches.get_one::<String>("output") {
        Some(path) => PathBuf::from(path),
        None => input.with_extension("html"),
    }
}

fn load_cli_config(explicit_path: Option<&Path>) -> MakeHtmlConfig {
    let loader = match explicit_path {
        Some(path) if path.exists() => Loader::new().with_file(path),
        Some(path) => {
            eprintln!("Warning: Config file not found: {}", path.display());
            eprintln!("Using default configuration.");
            Loader::new()
        }
        None => return load_user_config(user_config_path()),
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Per-user configuration: used when present (falling back to the defaults
/// when it cannot be read), created from the defaults otherwise.
fn load_user_config(user_path: Option<PathBuf>) -> MakeHtmlConfig {
    match user_path {
        Some(path) if path.exists() => {
            Loader::new().with_file(&path).build().unwrap_or_else(|err| {
                eprintln!("Error loading config from {}: {err}", path.display());
                eprintln!("Using default configuration.");
                default_config()
            })
        }
        Some(path) => {
            eprintln!("Creating default configuration at: {}", path.display());
            match write_default_config(&path) {
                Ok(()) => eprintln!(
                    "Configuration file created. You can edit it at: {}",
                    path.display()
                ),
                Err(err) => eprintln!("Warning: Could not create config file: {err}"),
            }
            default_config()
        }
        None => default_config(),
    }
}

fn default_config() -> MakeHtmlConfig {
    makehtml_config::load_defaults().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
