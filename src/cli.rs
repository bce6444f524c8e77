//! Command-line argument parsing for the batch transforms
//!
//! Supports:
//! - Padding files so every line ends at the same length
//! - Stripping one leading space per line
//! - Running a one-shot policy pass over files

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::align::AlignPolicy;

/// Batch leading-whitespace alignment over files
#[derive(Parser, Debug)]
#[command(name = "gutter", version, about = "Leading-whitespace alignment for text files")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pad every line so all lines end at the same length
    Align {
        /// Files to transform
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Rewrite files in place instead of printing to stdout
        #[arg(short, long)]
        write: bool,
    },
    /// Remove one leading space per line if present
    Unalign {
        /// Files to transform
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Rewrite files in place instead of printing to stdout
        #[arg(short, long)]
        write: bool,
    },
    /// Run a one-shot alignment pass with the configured policy
    Pass {
        /// Files to transform
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Rewrite files in place instead of printing to stdout
        #[arg(short, long)]
        write: bool,

        /// Override the configured policy
        #[arg(long, value_enum)]
        policy: Option<AlignPolicy>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_align_with_write() {
        let args = CliArgs::try_parse_from(["gutter", "align", "-w", "a.txt", "b.txt"]).unwrap();
        match args.command {
            Command::Align { files, write } => {
                assert_eq!(files.len(), 2);
                assert!(write);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_pass_policy_override() {
        let args =
            CliArgs::try_parse_from(["gutter", "pass", "--policy", "fibonacci-indent", "a.txt"])
                .unwrap();
        match args.command {
            Command::Pass { policy, .. } => {
                assert_eq!(policy, Some(AlignPolicy::FibonacciIndent));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_files_are_required() {
        assert!(CliArgs::try_parse_from(["gutter", "align"]).is_err());
    }
}
