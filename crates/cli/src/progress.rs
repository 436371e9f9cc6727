use indicatif::{ProgressBar, ProgressStyle};
use kintone_gen_core::{Progress, Result};
use std::time::{Duration, Instant};

/// Prints progress lines to stdout, with a spinner around long-running steps.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn step(&mut self, message: &str) {
        println!("{message}");
    }

    fn task<T>(&mut self, description: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let sp = spinner(description);
        let start = Instant::now();
        let result = f();
        sp.finish_and_clear();
        if result.is_ok() {
            println!("✅ openapi-generator finished in {}", format_elapsed_ms(start));
        }
        result
    }
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

fn format_elapsed_ms(start: Instant) -> String {
    format_elapsed(start.elapsed())
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() == 0 {
        return format!("{}ms", elapsed.as_millis());
    }
    let seconds = elapsed.as_secs();
    let remaining_ms = elapsed.subsec_millis();
    format!("{seconds}s {remaining_ms}ms")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250ms");
        assert_eq!(format_elapsed(Duration::from_millis(12_345)), "12s 345ms");
    }
}
