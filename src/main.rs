use std::{fs, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser as ClapParser;
use tracing::debug;

use minilang::{
    display_error,
    errors::errors::Error,
    execute, init_tracing,
    interpreter::runtime::{LineInput, StdoutOutput},
    parse_source, type_check,
};

#[derive(ClapParser)]
#[command(
    name = "minilang",
    about = "Typecheck and interpret minilang programs",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Path to the source file
    file: PathBuf,

    /// Stop after typechecking
    #[arg(long, conflicts_with = "no_check")]
    check_only: bool,

    /// Run without typechecking first
    #[arg(long)]
    no_check: bool,

    /// Print the parsed program before running it
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", cli.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    match run(&cli, &source, &file_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            display_error(&error, &source, &file_name);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, source: &str, file_name: &str) -> Result<(), Error> {
    let start = Instant::now();
    let program = parse_source(source, Some(file_name.to_string()))?;
    debug!(elapsed = ?start.elapsed(), "parsed");

    if cli.dump_ast {
        println!("{}", program);
    }

    if !cli.no_check {
        let check_start = Instant::now();
        type_check(&program)?;
        debug!(elapsed = ?check_start.elapsed(), "type checked");
    }

    if cli.check_only {
        return Ok(());
    }

    let run_start = Instant::now();
    execute(&program, &mut LineInput::stdin(), &mut StdoutOutput)?;
    debug!(elapsed = ?run_start.elapsed(), total = ?start.elapsed(), "executed");

    Ok(())
}
