//! script-stencil CLI
//!
//! Usage:
//!   script-stencil [OPTIONS] <FILE>
//!
//! Options:
//!   -r, --root <DIR>     Project root bounding the template search
//!   -c, --config <FILE>  Config file (default: <root>/stencil.toml)
//!   --stdout             Print the expansion instead of replacing the file
//!   -f, --force          Expand even if the extension is not watched
//!   --symbols            List the built-in symbols
//!   -h, --help           Print help

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use script_stencil::builtins::BUILTIN_SYMBOLS;
use script_stencil::{
    expand_new_file, expand_to_writer, process_created_file, Config, ConfigError, ExpandConfig,
};

#[derive(Parser)]
#[command(name = "script-stencil")]
#[command(about = "Expand #SYMBOL# placeholders in freshly created source files")]
struct Cli {
    /// Newly created file to expand
    file: Option<PathBuf>,

    /// Project root bounding the upward template search (default: current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Config file with project metadata and template settings (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the expansion to stdout instead of replacing the file
    #[arg(long)]
    stdout: bool,

    /// Expand the file even if its extension is not watched
    #[arg(short, long)]
    force: bool,

    /// List the built-in symbols
    #[arg(long)]
    symbols: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.symbols {
        print_symbols();
        return;
    }

    let Some(file) = cli.file.clone() else {
        if io::stdin().is_terminal() {
            print_intro();
            return;
        }
        eprintln!("Error: no file given (run with --help for usage)");
        std::process::exit(2);
    };

    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));

    let config = match load_config(&cli, &root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let expand_config = ExpandConfig::new(&config);

    // The dry-run and --force paths skip the extension gate; the plain
    // hook path goes through it so the editor can call us for every new
    // file.
    let result = if cli.stdout {
        let stdout = io::stdout();
        expand_to_writer(&file, &root, &expand_config, &mut stdout.lock())
    } else if cli.force {
        expand_new_file(&file, &root, &expand_config)
    } else {
        process_created_file(&file, &root, &expand_config).map(|_| ())
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli, root: &Path) -> Result<Config, ConfigError> {
    match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::discover(root),
    }
}

fn print_intro() {
    println!(
        r#"script-stencil - expand #SYMBOL# placeholders in new source files

USAGE:
    script-stencil [OPTIONS] <FILE>

OPTIONS:
    -r, --root      Project root bounding the template search
    -c, --config    Config file (default: <root>/stencil.toml)
    --stdout        Print the expansion instead of replacing the file
    -f, --force     Expand even if the extension is not watched
    --symbols       List the built-in symbols
    -h, --help      Print help

QUICK START:
    Put a template at <root>/ScriptTemplates/Template.rs.txt, then wire
    your editor's file-creation hook to run:

        script-stencil --root <root> <new-file>

    The template closest to the new file wins; without one, the file's
    own content is expanded in place. Run --symbols for the placeholder
    reference."#
    );
}

fn print_symbols() {
    println!("BUILT-IN SYMBOLS");
    println!("================");
    println!();
    for (symbol, description) in BUILTIN_SYMBOLS {
        println!("#{}#{:width$}{}", symbol, "", description, width = 20 - symbol.len());
    }
    println!();
    println!(
        r#"Symbols are case-sensitive and delimited by '#'. An unknown symbol,
or one that cannot produce text, is left in the output verbatim.
PROJECTNAME and COMPANY read the [project] table of stencil.toml."#
    );
}
