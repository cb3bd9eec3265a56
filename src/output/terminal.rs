//! Terminal input and output.
//!
//! Everything the operator sees or types goes through [`Console`], so the
//! interactive steps can be driven by a script in tests.

use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Operator-facing console.
pub trait Console {
    /// Print one status line.
    fn say(&mut self, line: &str);

    /// Prompt and read one line of visible input, without the line ending.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Prompt and read one line with echo suppressed.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// The process's stdin/stdout.
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for input",
            ));
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

pub fn success(message: &str) -> String {
    format!("{} {message}", "[ok]".green().bold())
}

pub fn failure(message: &str) -> String {
    format!("{} {message}", "[error]".red().bold())
}

pub fn warning(message: &str) -> String {
    format!("{} {message}", "[warn]".yellow())
}

pub fn progress(message: &str) -> String {
    format!("{} {message}", "[..]".cyan())
}

/// Console fed from a fixed list of answers, recording everything said.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedConsole {
    pub answers: std::collections::VecDeque<String>,
    pub secrets: std::collections::VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new(answers: &[&str], secrets: &[&str]) -> ScriptedConsole {
        ScriptedConsole {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            secrets: secrets.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn said(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.secrets
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}
