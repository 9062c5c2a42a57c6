//! sclight - print SuperCollider code or post output with syntax colors

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use crossterm::queue;
use crossterm::style::{self, Attribute, Print, SetAttribute, SetForegroundColor};
use tracing_subscriber::EnvFilter;

use sclight::config::Theme;
use sclight::error::{HighlightError, Result};
use sclight::syntax::{Color, Flavor, Highlighter, LineDocument, LineHost, Style};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut flavor = Flavor::Code;
    let mut theme_path = None;
    let mut file = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            "--post" => flavor = Flavor::Post,
            "--theme" => {
                let path = args
                    .next()
                    .ok_or_else(|| HighlightError::MissingArgument("--theme".to_string()))?;
                theme_path = Some(PathBuf::from(path));
            }
            "-" => file = None,
            _ if arg.starts_with('-') => {
                return Err(HighlightError::Message(format!("unknown option {} (see --help)", arg)));
            }
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let text = match &file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let theme = match &theme_path {
        Some(path) => Theme::load_from(path)?,
        None => Theme::load(),
    };

    let mut highlighter = Highlighter::new(LineDocument::from_text(&text), flavor);
    if theme != Theme::default() {
        highlighter.apply_theme(&theme);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&highlighter.into_host(), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Write every line with its spans as terminal colors
fn render(doc: &LineDocument, out: &mut impl Write) -> io::Result<()> {
    for line in 0..doc.line_count() {
        let chars: Vec<char> = doc.line_text(line).unwrap_or_default().chars().collect();
        let mut pos = 0;

        for span in doc.spans(line) {
            let start = span.start.min(chars.len());
            let end = span.end().min(chars.len());
            queue!(out, Print(chars[pos..start].iter().collect::<String>()))?;
            set_style(out, span.style)?;
            queue!(
                out,
                Print(chars[start..end].iter().collect::<String>()),
                SetAttribute(Attribute::Reset),
                style::ResetColor
            )?;
            pos = end;
        }

        queue!(out, Print(chars[pos..].iter().collect::<String>()), Print("\n"))?;
    }
    Ok(())
}

fn set_style(out: &mut impl Write, style: Style) -> io::Result<()> {
    queue!(out, SetForegroundColor(term_color(style.fg)))?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    Ok(())
}

/// Map our palette onto crossterm's (crossterm's plain names are the bright ones)
fn term_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

fn print_usage() {
    println!(
        "sclight {} - syntax highlighting for SuperCollider code and post output",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage: sclight [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or standard input) and prints it with colors.");
    println!();
    println!("Options:");
    println!("  --post          Highlight interpreter post output instead of code");
    println!("  --theme FILE    Load colors and custom rules from a TOML theme");
    println!("                  (default: ~/.sclight.toml if present)");
    println!("  -h, --help      Show this help message");
    println!("  -V, --version   Show version information");
    println!();
    println!("Set RUST_LOG=warn to see rules that were disabled.");
}

fn print_version() {
    println!("sclight {}", env!("CARGO_PKG_VERSION"));
}
