//! Terminal prompt that answers pending comparisons.

use log::debug;
use monkeysort_core::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    prelude::*,
};
use rustyline::{DefaultEditor, error::ReadlineError};
use std::path::PathBuf;

/// What one line of input means.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Reply {
    Pick(Choice),
    Quit,
    Unknown,
}

fn parse_reply(line: &str) -> Reply {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" => Reply::Pick(Choice::First),
        "2" => Reply::Pick(Choice::Second),
        "q" | "quit" => Reply::Quit,
        _ => Reply::Unknown,
    }
}

///
/// PromptOracle
///

pub struct PromptOracle {
    editor: DefaultEditor,
    asked: usize,
}

impl PromptOracle {
    pub fn new() -> Result<Self, InternalError> {
        let editor = DefaultEditor::new().map_err(|err| prompt_error(&err))?;

        Ok(Self { editor, asked: 0 })
    }
}

impl Oracle<PathBuf> for PromptOracle {
    fn choose(&mut self, key: &ComparisonKey<PathBuf>) -> Result<Option<Choice>, InternalError> {
        self.asked += 1;
        println!();
        println!("question {}: which ranks higher?", self.asked);
        println!("  [1] {}", key.first.display());
        println!("  [2] {}", key.second.display());

        loop {
            let line = match self.editor.readline("1/2 (q to stop)> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(prompt_error(&err)),
            };

            match parse_reply(&line) {
                Reply::Pick(choice) => {
                    debug!("answered {choice:?}");
                    return Ok(Some(choice));
                }
                Reply::Quit => return Ok(None),
                Reply::Unknown => println!("please type 1, 2 or q"),
            }
        }
    }
}

fn prompt_error(err: &ReadlineError) -> InternalError {
    InternalError::new(
        ErrorClass::Io,
        ErrorOrigin::Session,
        format!("prompt failed: {err}"),
    )
}

///
/// TESTS
///
