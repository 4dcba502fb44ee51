//! Main entry point for the imgkeys CLI.
//!
//! This binary is the thin transport around the conversion pipeline: it
//! reads the archive from a path or stdin, runs the pipeline, and writes
//! the finished spreadsheet to a file or stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use imgkeys::{pipeline, Cli, ExcludeList, LocalFileReader, MemoryReader};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let exclude = ExcludeList::parse(cli.exclude.as_deref());

    // Run the conversion against the appropriate byte source. The
    // underlying cause lands in the log; the caller-facing outcome is a
    // single processing failure.
    let bytes = if cli.reads_stdin() {
        let mut data = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut data)
            .await
            .context("failed to read archive from stdin")?;
        pipeline::run(Arc::new(MemoryReader::new(data)), &exclude)
            .await
            .context("processing failed")?
    } else {
        let reader = LocalFileReader::new(Path::new(&cli.archive))
            .with_context(|| format!("cannot open {}", cli.archive))?;
        pipeline::run(Arc::new(reader), &exclude)
            .await
            .context("processing failed")?
    };

    if cli.pipe {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.flush().await?;
    } else {
        tokio::fs::write(&cli.output, &bytes)
            .await
            .with_context(|| format!("cannot write {}", cli.output.display()))?;
        if !cli.is_quiet() {
            eprintln!("wrote {} ({} bytes)", cli.output.display(), bytes.len());
        }
    }

    Ok(())
}
