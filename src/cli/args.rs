// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and the bind and list subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "json-templates")]
#[command(about = "Bind JSON or YAML data into JSON-shaped templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bind a data file into a template document
    Bind {
        #[arg(help = "Path to the template document (JSON or YAML)")]
        template: PathBuf,

        #[arg(help = "Path to the source data (JSON or YAML)")]
        data: PathBuf,

        #[arg(short, long, help = "Name of the template to bind (defaults to the root)")]
        name: Option<String>,

        #[arg(short, long, help = "Write the output to a file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Write compact JSON instead of pretty-printed JSON")]
        compact: bool,
    },

    /// List the named templates of a template document
    List {
        #[arg(help = "Path to the template document (JSON or YAML)")]
        template: PathBuf,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
