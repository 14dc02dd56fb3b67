//! yutex - A line-oriented lexer and highlighter for the yutex markup.
//!
//! This binary provides the CLI interface to the yutex libraries, lexing
//! documents from files or stdin and printing the result.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, trace, warn, LevelFilter};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use yutex_config::Config;
use yutex_core::Result;
use yutex_lexer::{LanguageRegistry, Lexer};
use yutex_render::Renderer;
use yutex_syntax::SyntaxRegistry;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle informational flags
    if cli.show_paths {
        cli::show_paths();
        return;
    }
    if cli.show_languages {
        cli::show_languages();
        return;
    }

    // Set up logging
    setup_logging(&cli.log_level);
    info!("yutex v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli);
    debug!("Loaded config: {:?}", config.lexer);

    // Syntax definitions are only loaded when bodies are delegated
    let embedded = config.lexer.embedded() && !cli.no_embed;
    let registry = embedded.then(SyntaxRegistry::new);
    let registry: Option<&dyn LanguageRegistry> = registry.as_ref().map(|r| r as &dyn LanguageRegistry);

    let stdout = io::stdout();
    let mut renderer = Renderer::with_palette(stdout.lock(), cli.output_format(), &config.palette);
    renderer.set_color(cli.use_color());

    if cli.should_read_stdin() {
        info!("Reading from stdin");
        let stdin = io::stdin();
        lex_stream(cli, &config, registry, stdin.lock(), "<stdin>", &mut renderer)?;
    } else {
        for path in &cli.files {
            info!("Processing file: {}", path.display());
            let reader = BufReader::new(File::open(path)?);
            renderer.reset_line_numbers();
            lex_stream(cli, &config, registry, reader, &path.display().to_string(), &mut renderer)?;
        }
    }

    renderer.flush()?;
    Ok(())
}

/// Load configuration with optional overrides.
///
/// A broken config is reported and replaced by the defaults.
fn load_config(cli: &Cli) -> Config {
    match Config::load_with_override(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config: {}", e);
            Config::default()
        }
    }
}

/// Lex one document line by line, rendering each line as it is read.
fn lex_stream<R: BufRead, W: Write>(
    cli: &Cli,
    config: &Config,
    registry: Option<&dyn LanguageRegistry>,
    mut reader: R,
    name: &str,
    renderer: &mut Renderer<W>,
) -> Result<()> {
    let lexer = match registry {
        Some(registry) => Lexer::with_registry(registry),
        None => Lexer::default(),
    };
    let mut lexer = lexer.default_language(config.lexer.default_language());

    let mut buf = Vec::new();
    while let Some(line) = read_line_lossy(&mut reader, &mut buf)? {
        trace!("Input line: {}", line);
        let lexed = lexer.lex_line(&line);
        renderer.render_line(&line, &lexed)?;
    }
    renderer.flush()?;

    if let Err(e) = lexer.finish() {
        if cli.strict {
            error!("{}: document is incomplete", name);
            return Err(e);
        }
        debug!("{}: {}", name, e);
    }
    Ok(())
}

/// Read the next line without its terminator.
///
/// Invalid UTF-8 is replaced rather than ending the run. Returns `None` at
/// end of input.
fn read_line_lossy<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    let line = String::from_utf8_lossy(buf);
    if let Cow::Owned(_) = line {
        warn!("Replaced invalid UTF-8 in input line");
    }
    Ok(Some(line.into_owned()))
}
