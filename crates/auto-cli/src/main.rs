//! Auto CLI - Command line front-end for the Auto parser

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Once;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use tracing::debug;

use auto_ast::ToAuto;
use auto_lexer::Lexer;
use auto_parser::{parse, ErrorCategory, ParseError};

#[derive(Parser)]
#[command(name = "auto")]
#[command(about = "Auto language parser front-end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and output the AST as JSON
    Parse {
        /// Input file
        file: PathBuf,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print the token stream of a file
    Tokens {
        /// Input file
        file: PathBuf,
    },
    /// Check that files parse
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
    },
    /// Print a file in canonical form
    Fmt {
        /// Input file
        file: PathBuf,
    },
}

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=auto_parser=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { file, pretty } => cmd_parse(&file, pretty),
        Commands::Tokens { file } => cmd_tokens(&file),
        Commands::Check { files } => cmd_check(&files),
        Commands::Fmt { file } => cmd_fmt(&file),
    }
}

fn read_source(file: &Path) -> String {
    let source = match fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            process::exit(1);
        }
    };
    debug!(file = %file.display(), bytes = source.len(), "read source");
    source
}

fn cmd_parse(file: &Path, pretty: bool) {
    let source = read_source(file);

    match parse(&source) {
        Ok(program) => {
            let json = if pretty {
                serde_json::to_string_pretty(&program)
            } else {
                serde_json::to_string(&program)
            };
            match json {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing AST: {}", e);
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            report_parse_error(&source, file, &e);
            process::exit(1);
        }
    }
}

fn cmd_tokens(file: &Path) {
    let source = read_source(file);

    for result in Lexer::new(&source) {
        match result {
            Ok(token) => {
                let marker = if token.newline_before { "⏎" } else { " " };
                println!(
                    "{:>5}..{:<5} {} {:<16} {:?}",
                    token.span.start,
                    token.span.end,
                    marker,
                    format!("{:?}", token.kind),
                    token.text(&source)
                );
            }
            Err(e) => {
                report_parse_error(&source, file, &ParseError::Lexical(e));
                process::exit(1);
            }
        }
    }
}

fn cmd_check(files: &[PathBuf]) {
    let mut all_ok = true;

    for file in files {
        debug!(file = %file.display(), "check");
        let source = match fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", file.display(), e);
                all_ok = false;
                continue;
            }
        };

        match parse(&source) {
            Ok(program) => {
                println!(
                    "✓ {} - {} statements",
                    file.display(),
                    program.statements.len()
                );
            }
            Err(e) => {
                let category = match e.category() {
                    ErrorCategory::Lexical => "lexical error",
                    ErrorCategory::Syntax => "syntax error",
                    ErrorCategory::Ambiguity => "ambiguous brace",
                };
                eprintln!("✗ {} - {}", file.display(), category);
                report_parse_error(&source, file, &e);
                all_ok = false;
            }
        }
    }

    if !all_ok {
        process::exit(1);
    }
}

fn cmd_fmt(file: &Path) {
    let source = read_source(file);

    match parse(&source) {
        Ok(program) => println!("{}", program.to_auto(0)),
        Err(e) => {
            report_parse_error(&source, file, &e);
            process::exit(1);
        }
    }
}

fn report_parse_error(source: &str, file: &Path, error: &ParseError) {
    let name = file.to_string_lossy().to_string();
    let span = error.span();
    let result = Report::build(ReportKind::Error, name.clone(), span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(error.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));

    if let Err(e) = result {
        eprintln!("{}: {}", file.display(), error);
        eprintln!("(failed to render report: {})", e);
    }
}
