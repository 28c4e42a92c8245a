//! CLI schema for the codeshift binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codeshift")]
#[command(about = "Compute smooth transitions between two code snapshots")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the transition model as JSON
	Step {
		#[command(flatten)]
		input: InputArgs,

		/// Indent the JSON output
		#[arg(long)]
		pretty: bool,
	},
	/// Print evenly spaced frames of the transition as text
	Frames {
		#[command(flatten)]
		input: InputArgs,

		/// Number of intervals; prints one more frame than this
		#[arg(long, short = 'n', default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
		count: u32,
	},
}

/// Inputs shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
	/// File holding the previous snapshot (empty when omitted)
	#[arg(long, value_name = "FILE")]
	pub prev: Option<PathBuf>,

	/// File holding the next snapshot (empty when omitted)
	#[arg(long, value_name = "FILE")]
	pub next: Option<PathBuf>,

	/// Language passed to the tokenizer
	#[arg(long, default_value = "text")]
	pub lang: String,

	/// Focus expression for the previous snapshot (e.g. `2:4,6[3:9]`)
	#[arg(long, value_name = "EXPR")]
	pub focus_prev: Option<String>,

	/// Focus expression for the next snapshot
	#[arg(long, value_name = "EXPR")]
	pub focus_next: Option<String>,

	/// JSON file of annotations: `{"prev": [...], "next": [...]}`
	#[arg(long, value_name = "FILE")]
	pub annotations: Option<PathBuf>,

	/// TOML engine and theme configuration
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
}
