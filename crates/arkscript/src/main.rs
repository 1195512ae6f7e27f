use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use arkscript_client::{HttpServer, Session};
use arkscript_common::config::{self, Config};
use arkscript_common::Diagnostic;
use arkscript_lexer::highlight::{self, Theme};
use arkscript_lexer::lexer::tokenize_source;
use arkscript_lexer::lint;

/// arkscript command line.
///
/// Highlights and checks arkscript files locally, and drives an arkscript
/// server: upload input files, run scripts, download their results.
#[derive(Parser)]
#[command(
    name = "arkscript",
    version,
    about,
    long_about = "arkscript command line.\n\nHighlights and checks .ark scripts locally and runs them on an arkscript server.\n\nExamples:\n  arkscript highlight script.ark          Print with terminal colours\n  arkscript check script.ark              Report what the interpreter would reject\n  arkscript upload datos.txt informe.pdf  Upload input files\n  arkscript run script.ark                Execute against the uploaded files\n  arkscript download resultado.txt        Fetch an output file"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server base URL (overrides Arkscript.toml).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Path to an Arkscript.toml (default: searched upwards from the current directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print a script with syntax highlighting
    Highlight {
        input: PathBuf,

        /// Emit HTML with cm-* classes instead of terminal colours
        #[arg(long)]
        html: bool,
    },

    /// Print the token stream of a script
    Tokens {
        input: PathBuf,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a script for input the interpreter rejects
    Check { input: PathBuf },

    /// Upload input files (.txt and .pdf by default) to the server
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Execute a script on the server
    Run {
        input: PathBuf,

        /// Send the script even if the local check finds errors
        #[arg(long = "no-check")]
        no_check: bool,
    },

    /// List the input files held by the server
    Files,

    /// Download an output file produced by a script
    Download {
        name: String,

        /// Destination path (default: the file name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(msg) = run(cli) {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref(), cli.server)?;

    match cli.command {
        Command::Highlight { input, html } => {
            let source = read_source(&input)?;
            if html {
                print!("{}", highlight::render_html(&source));
            } else {
                let theme = Theme::default().with_overrides(&config.highlight);
                print!("{}", highlight::render_ansi(&source, &theme));
            }
            Ok(())
        }

        Command::Tokens { input, json } => {
            let source = read_source(&input)?;
            let tokens = tokenize_source(&source);
            if json {
                let out = serde_json::to_string_pretty(&tokens)
                    .map_err(|e| format!("failed to serialize tokens: {}", e))?;
                println!("{}", out);
            } else {
                for token in &tokens {
                    println!(
                        "{:>4}:{:<3} {:<8} {:?}",
                        token.span.start.line, token.span.start.column, token.kind, token.lexeme,
                    );
                }
            }
            Ok(())
        }

        Command::Check { input } => {
            let source = read_source(&input)?;
            check_source(&source, &display_name(&input))?;
            println!("No errors found.");
            Ok(())
        }

        Command::Upload { files } => {
            let mut session = connect(&config)?;
            let resp = session.upload(&files).map_err(|e| e.to_string())?;
            if resp.error {
                return Err(resp.output);
            }
            println!("{}", resp.output);
            print_file_list("Input files", session.input_files());
            Ok(())
        }

        Command::Run { input, no_check } => {
            let source = read_source(&input)?;
            if !no_check {
                check_source(&source, &display_name(&input))?;
            }

            let mut session = connect(&config)?;
            session.sync().map_err(|e| e.to_string())?;
            let resp = session.run(&source).map_err(|e| e.to_string())?;
            if resp.error {
                eprint!("{}", resp.output);
                return Err("script failed on the server".to_string());
            }
            print!("{}", resp.output);
            if !session.output_files().is_empty() {
                print_file_list("Output files", session.output_files());
            }
            Ok(())
        }

        Command::Files => {
            let mut session = connect(&config)?;
            let files = session.sync().map_err(|e| e.to_string())?;
            print_file_list("Input files", files);
            Ok(())
        }

        Command::Download { name, output } => {
            let session = connect(&config)?;
            let bytes = session.download(&name).map_err(|e| e.to_string())?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(Path::new(&name).file_name().unwrap_or_default())
            });
            fs::write(&path, &bytes)
                .map_err(|e| format!("could not write '{}': {}", path.display(), e))?;
            println!("Saved {} ({} bytes)", path.display(), bytes.len());
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&Path>, server: Option<String>) -> Result<Config, String> {
    let mut config = match explicit {
        Some(path) => config::load_config(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            config::find_and_load_config(&cwd)
        }
    }
    .map_err(|e| e.to_string())?;

    if let Some(url) = server {
        config.server.base_url = url;
    }
    if let Some(ref root) = config.root_dir {
        tracing::debug!(root = %root.display(), "loaded Arkscript.toml");
    }
    Ok(config)
}

fn connect(config: &Config) -> Result<Session<HttpServer>, String> {
    let server = HttpServer::from_config(config).map_err(|e| e.to_string())?;
    Ok(Session::new(server))
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("could not read '{}': {}", path.display(), e))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Lint `source`, print every diagnostic, fail if any is an error.
fn check_source(source: &str, file_name: &str) -> Result<(), String> {
    let bag = lint::check(source);
    for diag in bag.diagnostics() {
        print_diagnostic(diag, source, file_name);
    }
    let errors = bag.error_count();
    if errors > 0 {
        return Err(format!("aborting due to {} error(s)", errors));
    }
    Ok(())
}

fn print_file_list(title: &str, files: &[String]) {
    if files.is_empty() {
        println!("{}: (none)", title);
        return;
    }
    println!("{}:", title);
    for name in files {
        println!("  {}", name);
    }
}

fn print_diagnostic(diag: &Diagnostic, source: &str, file_name: &str) {
    let kind = if diag.is_error() {
        ReportKind::Error
    } else {
        ReportKind::Warning
    };

    if let Some(span) = diag.span {
        // ariadne counts chars, spans count bytes.
        let range = span.range();
        let chars_before = |byte: usize| source.get(..byte).map_or(0, |s| s.chars().count());
        let start = chars_before(range.start);
        let end = chars_before(range.end).max(start + 1);

        let color = if diag.is_error() {
            Color::Red
        } else {
            Color::Yellow
        };

        let mut report = Report::build(kind, file_name, start)
            .with_message(&diag.message)
            .with_label(
                Label::new((file_name, start..end))
                    .with_message(&diag.message)
                    .with_color(color),
            );

        if let Some(ref suggestion) = diag.suggestion {
            report = report.with_help(suggestion);
        }

        if let Err(e) = report
            .finish()
            .eprint((file_name, Source::from(source)))
        {
            eprintln!("{} (could not render report: {})", diag, e);
        }
    } else {
        eprintln!("{}: {}", diag.severity.label(), diag.message);
        if let Some(ref suggestion) = diag.suggestion {
            eprintln!("   = help: {}", suggestion);
        }
        eprintln!();
    }
}
