use clap::Parser;
use std::path::{Path, PathBuf};

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(version, about = "Stack-machine lite C compiler", long_about = None)]
pub struct Args {
    /// Stop after lexing and dump the tokens
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and dump the syntax tree
    #[arg(long)]
    pub parse: bool,

    /// Stop after flattening and dump the entries
    #[arg(long)]
    pub flatten: bool,

    /// Stop after structural recovery and dump the program
    #[arg(long)]
    pub recover: bool,

    /// Stop after validation
    #[arg(long)]
    pub validate: bool,

    /// Stop after code generation and dump the assembly model
    #[arg(long)]
    pub codegen: bool,

    /// Output file, `-` for stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log stage progress and skipped constructs
    #[arg(short, long)]
    pub verbose: bool,

    pub input: PathBuf,
}

impl Args {
    pub fn stops_early(&self) -> bool {
        self.lex || self.parse || self.flatten || self.recover || self.validate || self.codegen
    }

    /// `None` when the assembly goes to stdout.
    pub fn output_path(&self) -> Option<PathBuf> {
        match self.output.as_deref() {
            Some(path) if path == Path::new("-") => None,
            Some(path) => Some(path.to_path_buf()),
            None => Some(self.input.with_extension("s")),
        }
    }
}
