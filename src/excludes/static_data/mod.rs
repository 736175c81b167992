pub mod directory_names;

pub use directory_names::{DIRECTORY_NAME_TABLE, reason_for_directory_name};
