// input.rs — Blocking line reads and validated input parsing.
//
// All user input comes through a single rustyline editor so the menu
// gets line editing for free. Parsing is split into pure functions
// (testable without a terminal); the prompt loops re-ask on validation
// failure and treat Ctrl-C / Ctrl-D as "cancel this operation".

use quest_goal::{Priority, QuestError};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Parse a non-negative point value. A minus sign or any other
/// non-numeric input is a validation error, never a panic.
pub fn parse_points(input: &str) -> Result<u32, QuestError> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| QuestError::Validation("enter a non-negative whole number".to_string()))
}

/// Parse a checklist completion target (must be at least 1).
pub fn parse_required_times(input: &str) -> Result<u32, QuestError> {
    let times = parse_points(input)?;
    if times == 0 {
        return Err(QuestError::Validation(
            "the goal must be completed at least once".to_string(),
        ));
    }
    Ok(times)
}

/// Parse a 1-based goal number as shown in listings into the 0-based
/// index the tracker uses. Range checking is left to the tracker.
pub fn parse_goal_number(input: &str) -> Result<usize, QuestError> {
    let number = input
        .trim()
        .parse::<usize>()
        .map_err(|_| QuestError::Validation("enter a goal number".to_string()))?;
    if number == 0 {
        return Err(QuestError::Validation(
            "goal numbers start at 1".to_string(),
        ));
    }
    Ok(number - 1)
}

/// Interactive prompt wrapper around a rustyline editor.
pub struct Prompt {
    editor: DefaultEditor,
}

impl Prompt {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    /// Read one line. `None` means the user cancelled (Ctrl-C/Ctrl-D).
    pub fn line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Read a non-empty line, re-prompting until one is given.
    pub fn required_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        loop {
            match self.line(prompt)? {
                Some(line) if line.is_empty() => println!("A value is required."),
                other => return Ok(other),
            }
        }
    }

    /// Read a line and parse it, re-prompting on validation failure.
    fn parsed<T>(
        &mut self,
        prompt: &str,
        parse: fn(&str) -> Result<T, QuestError>,
    ) -> anyhow::Result<Option<T>> {
        loop {
            let Some(line) = self.line(prompt)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => println!("{err}"),
            }
        }
    }

    pub fn points(&mut self, prompt: &str) -> anyhow::Result<Option<u32>> {
        self.parsed(prompt, parse_points)
    }

    pub fn required_times(&mut self, prompt: &str) -> anyhow::Result<Option<u32>> {
        self.parsed(prompt, parse_required_times)
    }

    pub fn goal_number(&mut self, prompt: &str) -> anyhow::Result<Option<usize>> {
        self.parsed(prompt, parse_goal_number)
    }

    pub fn priority(&mut self, prompt: &str) -> anyhow::Result<Option<Priority>> {
        self.parsed(prompt, str::parse::<Priority>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_accept_zero_and_reject_negatives() {
        assert_eq!(parse_points("0").unwrap(), 0);
        assert_eq!(parse_points(" 25 ").unwrap(), 25);
        assert!(parse_points("-5").is_err());
        assert!(parse_points("ten").is_err());
        assert!(parse_points("").is_err());
    }

    #[test]
    fn required_times_must_be_positive() {
        assert_eq!(parse_required_times("4").unwrap(), 4);
        assert!(parse_required_times("0").is_err());
        assert!(parse_required_times("x").is_err());
    }

    #[test]
    fn goal_numbers_are_one_based() {
        assert_eq!(parse_goal_number("1").unwrap(), 0);
        assert_eq!(parse_goal_number("3").unwrap(), 2);
        assert!(parse_goal_number("0").is_err());
        assert!(parse_goal_number("first").is_err());
    }
}
