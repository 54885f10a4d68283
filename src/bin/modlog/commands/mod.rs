mod ls;
mod size;
mod write;

pub use ls::execute_ls;
pub use size::execute_size;
pub use write::execute_write;
