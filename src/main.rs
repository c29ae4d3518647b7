//! blockdown CLI - Markdown to HTML from a file or stdin

use std::io::{self, Read, Write};
use std::path::PathBuf;

use blockdown::{InlineKind, InlineSet, Options, Parser as Converter};
use clap::Parser;

#[derive(Parser)]
#[command(name = "blockdown")]
#[command(about = "Convert Markdown to HTML")]
struct Args {
    /// Markdown file to convert; `-` or nothing reads stdin
    input: Option<PathBuf>,

    /// Turn every line break inside a paragraph into <br />
    #[arg(long)]
    breaks: bool,

    /// Render raw HTML as text
    #[arg(long)]
    escape_markup: bool,

    /// Do not link bare http(s) URLs
    #[arg(long)]
    no_autolink: bool,

    /// Sanitize links and attributes and escape all raw HTML
    #[arg(long)]
    safe: bool,

    /// Require a space after the # of a heading
    #[arg(long)]
    strict: bool,

    /// Treat the input as a single line of inline Markdown
    #[arg(long)]
    inline: bool,

    /// Inline recognizer to disable in --inline mode (repeatable)
    #[arg(long = "disable", value_name = "KIND", requires = "inline")]
    disabled: Vec<InlineKind>,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            break_on_newline: self.breaks,
            escape_raw_markup: self.escape_markup,
            autolink_bare_urls: !self.no_autolink,
            safe_mode: self.safe,
            strict_headings: self.strict,
            ..Options::default()
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = match &args.input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let converter = Converter::new(args.options());
    let html = if args.inline {
        let disabled: InlineSet = args.disabled.iter().copied().collect();
        converter.render_inline(input.trim_end_matches('\n'), disabled)
    } else {
        converter.render_document(&input)
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
