// Write command implementation

use anyhow::Result;
use modlog::{ErrorInfo, LoggerOptions, LoggerRegistry};

use crate::cli::WriteArgs;

/// Execute the write command
pub fn execute_write(args: &WriteArgs, registry: &LoggerRegistry) -> Result<()> {
    let options = LoggerOptions {
        strategy: args.strategy,
        folder_path: args.folder.clone(),
        max_size: args.max_size,
    };
    let logger = registry.get_or_create_with(&args.name, &options)?;

    let error = args
        .error_type
        .as_ref()
        .map(|type_name| ErrorInfo::new(type_name.as_str(), args.error_message.as_str(), ""));

    let line = logger.log(args.level, &args.message, error.as_ref())?;
    println!("{}", line);

    logger.dispose();
    Ok(())
}
