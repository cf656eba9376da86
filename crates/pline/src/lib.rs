// pline library exports

pub mod app;
pub mod command_processor;
pub mod config;
pub mod tty;

pub use app::App;
pub use command_processor::CommandProcessor;
pub use config::Config;
pub use tty::TtyChannel;
