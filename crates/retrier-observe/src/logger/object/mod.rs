mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;
