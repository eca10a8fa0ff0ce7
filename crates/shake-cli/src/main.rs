//! css-shake - Main Entry Point
//!
//! Reads a page, tree shakes its inline styles and writes the page back.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shake_engine::{CssTreeShaker, OutputMode, ShakerConfig, Shaking, DEFAULT_STYLES_LIMIT};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Tree shake the inline styles of an HTML page
#[derive(Parser, Debug)]
#[command(name = "css-shake", version, about)]
struct Cli {
    /// Input HTML file, `-` or nothing for stdin
    input: Option<PathBuf>,

    /// Output file, stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Shake once styles reach this many bytes
    #[arg(short, long, default_value_t = DEFAULT_STYLES_LIMIT)]
    limit: usize,

    /// Shake regardless of the limit
    #[arg(short, long)]
    force: bool,

    /// Fail on HTML parse errors and malformed styles
    #[arg(long)]
    strict: bool,

    /// Re-serialize the document instead of splicing the source
    #[arg(long)]
    serialize: bool,

    /// Print the shaking report to stderr
    #[arg(long)]
    report: bool,
}

impl Cli {
    fn config(&self) -> ShakerConfig {
        let output = if self.serialize { OutputMode::Serialize } else { OutputMode::Splice };
        ShakerConfig::new()
            .with_limit(self.limit)
            .strict(self.strict)
            .with_output(output)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut html = String::new();
                io::stdin()
                    .read_to_string(&mut html)
                    .context("failed to read stdin")?;
                Ok(html)
            }
        }
    }

    fn write_output(&self, html: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => fs::write(path, html)
                .with_context(|| format!("failed to write {}", path.display())),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(html.as_bytes()).context("failed to write stdout")?;
                stdout.flush().context("failed to write stdout")
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the page
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("css_shake=info,shake_engine=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("css-shake {}", shake_engine::VERSION);

    let html = cli.read_input()?;
    let mut shaker = CssTreeShaker::from_html(&html, cli.config()).context("failed to parse HTML")?;
    let output = shaker.shake_it(cli.force).context("failed to shake styles")?;

    if cli.report {
        eprintln!("{}", shaker.report());
    }
    cli.write_output(&output)
}
