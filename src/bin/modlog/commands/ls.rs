// Ls command implementation

use anyhow::{Context, Result};
use modlog::fs::{calc_file_size, format_bytes};
use modlog::LoggerRegistry;
use std::path::PathBuf;

use crate::cli::LsArgs;

/// Execute the ls command
pub fn execute_ls(args: &LsArgs, registry: &LoggerRegistry) -> Result<()> {
    let folder = match &args.folder {
        Some(folder) => PathBuf::from(folder),
        None => registry.default_folder_path().to_path_buf(),
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(&folder)
        .with_context(|| format!("Failed to read folder: {}", folder.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "log") {
            let size = calc_file_size(&path)?;
            files.push((path, size));
        }
    }
    files.sort();

    for (path, size) in &files {
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        println!("{:>12}  {}", format_bytes(*size, args.decimal_places), name);
    }
    println!("\nTotal: {} files", files.len());
    Ok(())
}
