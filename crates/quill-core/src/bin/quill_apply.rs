//! quill-apply
//!
//! Applies one toolbar action to a buffer read from stdin and prints the
//! resulting buffer and selection as JSON.
//!
//! Usage:
//!   quill-apply <ACTION> <START> <END> < buffer
//!
//! Examples:
//!   echo -n "hello world" | quill-apply bold 0 5
//!   {"buffer":"**hello** world","selection":{"start":2,"end":7}}

use std::io::Read;

use clap::Parser;
use quill_core::{apply, MarkdownAction, SelectionRange};
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "quill-apply")]
#[command(about = "Apply a markdown toolbar action to text read from stdin")]
#[command(version)]
struct Args {
    /// Action identifier (bold, italic, strike, code, h1, h2, h3, ul, ol, quote, hr, link, image)
    action: MarkdownAction,

    /// Selection start, in bytes
    start: usize,

    /// Selection end, in bytes
    end: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    tracing::debug!("Applying {} to {} bytes", args.action, buffer.len());

    let result = apply(args.action, &buffer, SelectionRange::new(args.start, args.end));
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
