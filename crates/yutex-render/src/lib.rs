//! Yutex Render
//!
//! Output for lexed yutex documents.
//!
//! # Formats
//!
//! - **ansi** - The source text colored per token kind with 24-bit escapes
//! - **tokens** - A readable dump: the stack after each line, then one row per token
//! - **json** - One JSON object per line, for editors and other tools
//!
//! # Example
//!
//! ```
//! use yutex_lexer::Lexer;
//! use yutex_render::{OutputFormat, Renderer};
//!
//! let mut lexer = Lexer::new();
//! let mut output = Vec::new();
//! let mut renderer = Renderer::new(&mut output, OutputFormat::Tokens);
//!
//! let line = "\\section{intro}";
//! renderer.render_line(line, &lexer.lex_line(line)).unwrap();
//!
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.starts_with("1: root"));
//! ```

pub mod json;
pub mod style;

pub use json::{signal_name, to_json_line};
pub use style::TokenStyles;

use std::io::{self, Write};
use std::str::FromStr;
use yutex_config::PaletteConfig;
use yutex_core::YutexError;
use yutex_lexer::LexedLine;

/// Check if stdout is an interactive terminal.
pub fn is_tty() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Colored source text
    #[default]
    Ansi,
    /// Token dump
    Tokens,
    /// JSON lines
    Json,
}

impl OutputFormat {
    /// Every format name accepted by [`FromStr`].
    pub const NAMES: [&'static str; 3] = ["ansi", "tokens", "json"];
}

impl FromStr for OutputFormat {
    type Err = YutexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" => Ok(OutputFormat::Ansi),
            "tokens" => Ok(OutputFormat::Tokens),
            "json" => Ok(OutputFormat::Json),
            other => Err(YutexError::Render(format!("unknown output format: {}", other))),
        }
    }
}

/// Writes lexed lines in one of the [`OutputFormat`]s.
pub struct Renderer<W: Write> {
    /// Output writer
    writer: W,
    /// Output format
    format: OutputFormat,
    /// Styles for the ansi format
    styles: TokenStyles,
    /// Emit color escapes in the ansi format
    color: bool,
    /// Number of lines written so far
    line_no: usize,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer with the default palette.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self::with_palette(writer, format, &yutex_config::Config::default().palette)
    }

    /// Create a renderer with a custom palette.
    pub fn with_palette(writer: W, format: OutputFormat, palette: &PaletteConfig) -> Self {
        Self {
            writer,
            format,
            styles: TokenStyles::from_palette(palette),
            color: true,
            line_no: 0,
        }
    }

    /// Enable or disable color escapes in the ansi format.
    pub fn set_color(&mut self, enabled: bool) {
        self.color = enabled;
    }

    /// Get the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Start numbering lines from 1 again, e.g. for the next input file.
    pub fn reset_line_numbers(&mut self) {
        self.line_no = 0;
    }

    /// Render one source line and its lexer output.
    pub fn render_line(&mut self, line: &str, lexed: &LexedLine) -> io::Result<()> {
        self.line_no += 1;
        match self.format {
            OutputFormat::Ansi => self.render_ansi(line, lexed),
            OutputFormat::Tokens => self.render_tokens(line, lexed),
            OutputFormat::Json => {
                let json = to_json_line(self.line_no, line, lexed).map_err(io::Error::other)?;
                writeln!(self.writer, "{}", json)
            }
        }
    }

    /// Render every line of a document.
    pub fn render(&mut self, text: &str, lines: &[LexedLine]) -> io::Result<()> {
        for (line, lexed) in text.lines().zip(lines) {
            self.render_line(line, lexed)?;
        }
        self.flush()
    }

    /// Flush the writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn render_ansi(&mut self, line: &str, lexed: &LexedLine) -> io::Result<()> {
        let mut pos = 0;
        for token in &lexed.tokens {
            let text = token.text(line);
            if token.start() < pos || text.is_empty() {
                continue;
            }
            if token.start() > pos {
                self.writer.write_all(line[pos..token.start()].as_bytes())?;
            }
            if self.color {
                write!(self.writer, "{}", self.styles.get(token.kind).apply(text))?;
            } else {
                self.writer.write_all(text.as_bytes())?;
            }
            pos = token.end();
        }
        if pos < line.len() {
            self.writer.write_all(line[pos..].as_bytes())?;
        }
        writeln!(self.writer)
    }

    fn render_tokens(&mut self, line: &str, lexed: &LexedLine) -> io::Result<()> {
        write!(self.writer, "{}: {}", self.line_no, lexed.stack)?;
        if let Some(handoff) = &lexed.handoff {
            write!(self.writer, " [{} {}]", signal_name(handoff), handoff.language())?;
        }
        writeln!(self.writer)?;
        for token in &lexed.tokens {
            writeln!(
                self.writer,
                "  {} {}..{} {:?}",
                token.kind,
                token.start(),
                token.end(),
                token.text(line)
            )?;
        }
        Ok(())
    }
}
