//! Command-line interface for yutex.

use clap::Parser;
use std::path::PathBuf;
use yutex_render::OutputFormat;

/// yutex - A line-oriented lexer and highlighter for the yutex markup.
///
/// Classifies every line of a yutex document, hands code and HTML block
/// bodies to syntax-aware tokenizers, and prints the result as colored text,
/// a token dump or JSON lines.
#[derive(Parser, Debug)]
#[command(
    name = "yutex",
    author = "Yutex Contributors",
    version,
    about = "A line-oriented lexer and highlighter for the yutex markup",
    after_help = "Repository: https://github.com/yutex/yutex-rs\n\n\
                  Examples:\n  \
                  cat notes.yt | yutex\n  \
                  yutex -f tokens chapter.yt\n  \
                  yutex -f json --no-embed a.yt b.yt\n  \
                  yutex --strict -c '[lexer]\\nDefaultLanguage = \"cpp\"' problem.yt"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        default_value = "ansi",
        value_parser = OutputFormat::NAMES
    )]
    pub format: String,

    /// Leave code and HTML bodies as plain text
    #[arg(long = "no-embed")]
    pub no_embed: bool,

    /// Never emit color escapes
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Exit with an error when a document ends inside an open block
    #[arg(long = "strict")]
    pub strict: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,

    /// List the languages available to code blocks and exit
    #[arg(long = "languages")]
    pub show_languages: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// The selected output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format.parse().unwrap_or_default()
    }

    /// Whether color escapes should be written.
    pub fn use_color(&self) -> bool {
        !self.no_color && yutex_render::is_tty()
    }
}

/// Show paths information.
pub fn show_paths() {
    use yutex_config::Config;

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}

/// Show the languages code blocks can name, with their aliases.
pub fn show_languages() {
    let registry = yutex_syntax::SyntaxRegistry::new();

    println!("languages:");
    for name in registry.languages() {
        let aliases = yutex_syntax::aliases_for(name);
        if aliases.is_empty() {
            println!("  {}", name);
        } else {
            println!("  {:<30}{}", name, aliases.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default() {
        let cli = Cli::parse_from(["yutex"]);
        assert!(cli.files.is_empty());
        assert_eq!(cli.log_level, "warn");
        assert_eq!(cli.output_format(), OutputFormat::Ansi);
        assert!(!cli.no_embed);
        assert!(!cli.strict);
    }

    #[test]
    fn test_cli_parse_with_file() {
        let cli = Cli::parse_from(["yutex", "doc.yt"]);
        assert_eq!(cli.files.len(), 1);
        assert_eq!(cli.files[0], PathBuf::from("doc.yt"));
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::parse_from([
            "yutex",
            "-l", "debug",
            "-f", "json",
            "--no-embed",
            "--strict",
            "-c", "[lexer]\nEmbedded = false",
            "a.yt",
            "b.yt",
        ]);
        assert_eq!(cli.log_level, "debug");
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert!(cli.no_embed);
        assert!(cli.strict);
        assert_eq!(cli.config.as_deref(), Some("[lexer]\nEmbedded = false"));
        assert_eq!(cli.files.len(), 2);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["yutex", "-f", "html"]).is_err());
    }

    #[test]
    fn test_no_color_disables_color() {
        let cli = Cli::parse_from(["yutex", "--no-color"]);
        assert!(!cli.use_color());
    }

    #[test]
    fn test_should_read_stdin() {
        let cli = Cli::parse_from(["yutex"]);
        assert!(cli.should_read_stdin());

        let cli = Cli::parse_from(["yutex", "file.yt"]);
        assert!(!cli.should_read_stdin());
    }
}
