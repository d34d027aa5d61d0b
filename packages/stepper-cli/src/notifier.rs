//! Notification sink that prints to the terminal.

use api_lifecycle::BaseNotifier;
use console::style;

pub struct ConsoleNotifier;

impl BaseNotifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").cyan(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), message);
    }
}
