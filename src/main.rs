use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use gutter::align;
use gutter::cli::{CliArgs, Command};
use gutter::config::AlignerConfig;
use gutter::model::Document;

fn main() -> Result<()> {
    gutter::tracing::init();

    let args = CliArgs::parse();
    let config = AlignerConfig::load();

    match args.command {
        Command::Align { files, write } => {
            for path in &files {
                transform_file(path, write, |doc| {
                    align::align_now(doc);
                })?;
            }
        }
        Command::Unalign { files, write } => {
            for path in &files {
                transform_file(path, write, |doc| {
                    align::unalign(doc);
                })?;
            }
        }
        Command::Pass {
            files,
            write,
            policy,
        } => {
            let policy = policy.unwrap_or(config.policy);
            for path in &files {
                transform_file(path, write, |doc| {
                    let pass = align::plan_pass(doc, &[], policy);
                    align::apply_pass(doc, &pass);
                })?;
            }
        }
    }

    Ok(())
}

/// Load a file, run the transform, and either rewrite it in place or
/// print the result to stdout.
fn transform_file(path: &Path, write: bool, transform: impl Fn(&mut Document)) -> Result<()> {
    let mut doc = Document::from_file(path.to_path_buf())
        .with_context(|| format!("failed to read {}", path.display()))?;

    transform(&mut doc);

    let output = doc.buffer.to_string();
    if write {
        std::fs::write(path, &output)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("rewrote {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}
