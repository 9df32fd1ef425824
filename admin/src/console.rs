use std::io::{self, Write};
use std::str::FromStr;

use async_trait::async_trait;
use product_core::Confirm;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Line-oriented stdin shared by the command loop and confirmation prompts.
pub struct Console {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Print `text` without a newline and wait for one line of input.
    /// `None` means stdin is closed.
    pub async fn prompt(&self, text: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        self.lines.lock().await.next_line().await
    }
}

#[async_trait(?Send)]
impl Confirm for Console {
    async fn confirm(&self, prompt: &str) -> bool {
        match self.prompt(&format!("{prompt} [y/N] ")).await {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Blank input keeps `default`.
pub fn parse_field<T: FromStr>(input: &str, default: T) -> Result<T, T::Err> {
    let input = input.trim();
    if input.is_empty() {
        Ok(default)
    } else {
        input.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES\n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn blank_field_keeps_default() {
        assert_eq!(parse_field("", 5_i64), Ok(5));
        assert_eq!(parse_field("  ", 2.5_f64), Ok(2.5));
        assert_eq!(parse_field(" 7 ", 5_i64), Ok(7));
        assert!(parse_field("seven", 5_i64).is_err());
    }
}
