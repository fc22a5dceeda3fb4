//! CLI command implementations

use clap::Subcommand;

pub mod propagate;
pub mod types;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Annotate unannotated occurrences of source spans in JSON documents
    Propagate(propagate::PropagateArgs),

    /// List the types declared in a type system file
    Types(types::TypesArgs),
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        // A logger may already be installed when commands run in-process
        let env = env_logger::Env::default().default_filter_or(log_level);
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}
