pub mod fs;
pub mod path;
