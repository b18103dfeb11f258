pub mod console;

mod console_tests;

pub use console::{ConsoleRenderer, OutputFormat};
