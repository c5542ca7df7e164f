use clap::{Arg, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs; build scripts can't access src/ modules.
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("makehtml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert DOCX files to clean HTML with configurable formatting")
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
                .help("Path to output HTML file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to configuration file")
                .value_hint(ValueHint::FilePath),
        );

    generate_to(Bash, &mut cmd, "makehtml", &outdir)?;
    generate_to(Zsh, &mut cmd, "makehtml", &outdir)?;
    generate_to(Fish, &mut cmd, "makehtml", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
