pub mod archive;
pub mod config;
pub mod csv_export;
pub mod file_log;
pub mod measures;
pub mod pipeline;
pub mod policy;
pub mod scanner;
pub mod watcher;
