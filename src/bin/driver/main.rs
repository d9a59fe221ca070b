mod args;
mod driver_error;

use args::Args;
use clap::Parser;
use driver_error::DriverError;
use slcc::*;
use tracing_subscriber::EnvFilter;

use std::fs;

type BoxedError = Box<dyn std::error::Error>;

fn init_logging(args: &Args) {
    let default = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(args: &Args) -> Result<String, DriverError> {
    if !fs::exists(&args.input)? {
        let filename = args.input.to_string_lossy().to_string();
        return Err(DriverError::InputFileDoesNotExist(filename));
    }
    Ok(fs::read_to_string(&args.input)?)
}

fn tokenize(source: &str, args: &Args) -> Result<Vec<lexer::LinedToken>, DriverError> {
    let tokens = lexer::lex(source)?;
    if args.lex {
        dbg!(&tokens);
    }
    Ok(tokens)
}

fn parse(tokens: &[lexer::LinedToken], args: &Args) -> Result<ast::SyntaxTree, DriverError> {
    let tree = parser::parse(tokens)?;
    if args.parse {
        dbg!(&tree);
    }
    Ok(tree)
}

fn flatten(tree: ast::SyntaxTree, args: &Args) -> Vec<flatten::FlatEntry> {
    let entries = flatten::flatten(tree);
    if args.flatten {
        println!("{}", flatten::entries_to_string(&entries));
    }
    entries
}

fn recover(entries: &[flatten::FlatEntry], args: &Args) -> Result<program::Program, DriverError> {
    let program = recovery::recover(entries)?;
    tracing::debug!("{} diagnostics", program.diagnostics.len());
    if args.recover {
        dbg!(&program);
    }
    Ok(program)
}

fn gen_asm(program: &program::Program, args: &Args) -> Result<codegen::AsmProgram, DriverError> {
    let asm = codegen::codegen(program)?;
    if args.codegen {
        dbg!(&asm);
    }
    Ok(asm)
}

fn emit_asm(asm: &codegen::AsmProgram, args: &Args) -> Result<(), DriverError> {
    match args.output_path() {
        Some(path) => {
            tracing::debug!("writing {}", path.display());
            fs::write(path, asm.to_string())?;
        }
        None => print!("{asm}"),
    }
    Ok(())
}

pub fn main() -> Result<(), BoxedError> {
    let args = Args::parse();
    init_logging(&args);

    let source = read_source(&args)?;
    let tokens = tokenize(&source, &args)?;
    if args.lex {
        return Ok(());
    }

    let tree = parse(&tokens, &args)?;
    if args.parse {
        return Ok(());
    }

    let entries = flatten(tree, &args);
    if args.flatten {
        return Ok(());
    }

    let program = recover(&entries, &args)?;
    if args.recover {
        return Ok(());
    }

    semantic_analysis::validate(&program)?;
    if args.validate {
        return Ok(());
    }

    let asm = gen_asm(&program, &args)?;
    if args.stops_early() {
        return Ok(());
    }

    emit_asm(&asm, &args)?;
    Ok(())
}
