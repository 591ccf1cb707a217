pub mod error_log;
pub mod json_file;

pub use error_log::ErrorLog;
pub use json_file::JsonListFile;
