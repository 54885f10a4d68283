// Size command implementation

use anyhow::Result;
use modlog::fs::{calc_file_size, format_file_size};
use std::path::Path;

use crate::cli::SizeArgs;

/// Execute the size command
pub fn execute_size(args: &SizeArgs) -> Result<()> {
    let path = Path::new(&args.path);
    let formatted = format_file_size(path, args.decimal_places)?;
    let bytes = if path.exists() { calc_file_size(path)? } else { 0 };

    println!("Path: {}", path.display());
    println!("Size: {} ({} bytes)", formatted, bytes);
    Ok(())
}
