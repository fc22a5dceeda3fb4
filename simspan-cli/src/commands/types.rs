//! Types command implementation

use anyhow::{Context, Result};
use clap::Args;
use simspan_core::TypeSystem;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the types command
#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Type system definition (TOML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl TypesArgs {
    /// Execute the types command
    pub fn execute(&self) -> Result<()> {
        let type_system = TypeSystem::from_file(&self.file)
            .with_context(|| format!("Failed to load type system: {}", self.file.display()))?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_listing(&type_system, &mut out)?;
        Ok(())
    }
}

/// Write one line per declared type
pub fn write_listing<W: Write>(type_system: &TypeSystem, out: &mut W) -> Result<()> {
    for ty in type_system.handles() {
        let mut line = type_system.name(ty).to_string();
        if let Some(parent) = type_system.supertype(ty) {
            line.push_str(&format!(" : {}", type_system.name(parent)));
        }
        if type_system.is_abstract(ty) {
            line.push_str(" (abstract)");
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}
