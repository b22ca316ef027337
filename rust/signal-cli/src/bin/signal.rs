//! Signal CLI — command-line driver for the Signal language.
//!
//! Spec §6's CLI contract is deliberately thin: read a source file,
//! instantiate the built-in scope, run lex → parse → type-check → lower,
//! then tick the trigger until `main` completes. Exit code zero on success;
//! non-zero with `path:line:col: <code> <message>` on any `SyntaxError`.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};

use signal_compiler::compiler::emit;
use signal_compiler::{check, run_to_completion, CompileError};

fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}

#[derive(ClapParser)]
#[command(
    name = "signal",
    version,
    about = "Signal — a small statically-typed expression language compiling to a reactive dataflow graph",
    help_template = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}

Examples:
  signal run hello.sig      Compile and run, driving `main` to completion
  signal check hello.sig    Type-check only, print diagnostics
  signal ast hello.sig      Parse and print the AST as JSON
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a `.sig` source file and run its `main` binding to completion
    Run {
        /// Path to the source file
        file: PathBuf,
    },
    /// Lex, parse, and type-check a `.sig` source file without running it
    Check {
        /// Path to the source file
        file: PathBuf,
    },
    /// Parse a `.sig` source file and print its AST as JSON
    Ast {
        /// Path to the source file
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { file } => cmd_run(&file),
        Commands::Check { file } => cmd_check(&file),
        Commands::Ast { file } => cmd_ast(&file),
    }
}

fn read_source(file: &PathBuf) -> Result<String, ExitCode> {
    fs::read_to_string(file).map_err(|e| {
        eprintln!("{} {}: {e}", red("error:"), file.display());
        ExitCode::FAILURE
    })
}

fn report(err: &CompileError) -> ExitCode {
    for diagnostic in err.syntax_errors() {
        eprintln!("{diagnostic}");
    }
    ExitCode::FAILURE
}

fn cmd_check(file: &PathBuf) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };
    match check(file, &source) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn cmd_ast(file: &PathBuf) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };
    match check(file, &source) {
        Ok(checked) => {
            println!("{}", emit::emit_json(checked.statements()));
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

fn cmd_run(file: &PathBuf) -> ExitCode {
    let source = match read_source(file) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let checked = match check(file, &source) {
        Ok(checked) => checked,
        Err(e) => return report(&e),
    };
    match run_to_completion(&checked) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}
