//! Text-field front end for the engine.
//!
//! A [`FormSession`] owns the three input fields the way a GUI form would and
//! recomputes the result from scratch after every edit. The engine itself
//! never sees any state.

use std::io::{BufRead, Write};

use crate::core::engine::LdlEngine;
use crate::domain::model::{Field, InputMode, LdlResult, RawReading};
use crate::utils::error::Result;
use crate::utils::format::{self, DisplayOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum FormView {
    Result(LdlResult),
    /// Strict mode only: the first field that failed to parse.
    Invalid(String),
}

impl FormView {
    pub fn result(&self) -> Option<&LdlResult> {
        match self {
            FormView::Result(result) => Some(result),
            FormView::Invalid(_) => None,
        }
    }

    pub fn render(&self, options: &DisplayOptions) -> String {
        match self {
            FormView::Result(result) => format::render_text(result, options),
            FormView::Invalid(message) => format!("Invalid input: {}", message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    fields: RawReading,
    engine: LdlEngine,
}

impl FormSession {
    pub fn new(mode: InputMode) -> Self {
        Self {
            fields: RawReading::default(),
            engine: LdlEngine::new(mode),
        }
    }

    pub fn fields(&self) -> &RawReading {
        &self.fields
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) -> FormView {
        self.fields.set(field, text);
        self.view()
    }

    pub fn clear(&mut self) -> FormView {
        self.fields = RawReading::default();
        self.view()
    }

    pub fn view(&self) -> FormView {
        match self.engine.evaluate(&self.fields) {
            Ok(result) => FormView::Result(result),
            Err(e) => FormView::Invalid(e.user_friendly_message()),
        }
    }
}

enum FormCommand {
    Set(Field, String),
    Clear,
    Show,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<FormCommand, String> {
    match line {
        "clear" | "reset" => return Ok(FormCommand::Clear),
        "show" => return Ok(FormCommand::Show),
        "quit" | "exit" | "q" => return Ok(FormCommand::Quit),
        _ => {}
    }

    let (name, value) = line
        .split_once('=')
        .ok_or_else(|| format!("Expected <field>=<value>, got '{}'", line))?;
    let field = name
        .parse::<Field>()
        .map_err(|e| e.user_friendly_message())?;
    Ok(FormCommand::Set(field, value.trim().to_string()))
}

const HELP: &str = "Commands: total=<n>, hdl=<n>, trig=<n>, clear, show, quit";

/// Drives a session from line-oriented input until EOF or `quit`.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut FormSession,
    input: R,
    mut output: W,
    options: &DisplayOptions,
) -> Result<()> {
    writeln!(output, "{}", HELP)?;
    writeln!(output, "{}", session.view().render(options))?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let view = match parse_command(line) {
            Ok(FormCommand::Set(field, value)) => {
                tracing::debug!("Field {} set to '{}'", field.key(), value);
                session.set(field, value)
            }
            Ok(FormCommand::Clear) => session.clear(),
            Ok(FormCommand::Show) => session.view(),
            Ok(FormCommand::Quit) => break,
            Err(message) => {
                writeln!(output, "{}\n{}", message, HELP)?;
                continue;
            }
        };

        writeln!(output, "{}", view.render(options))?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Classification, RiskBand};

    #[test]
    fn test_initial_view_is_unclassified_zero() {
        let session = FormSession::new(InputMode::Lenient);
        let view = session.view();
        let result = view.result().unwrap();
        assert_eq!(result.ldl, 0.0);
        assert_eq!(result.classification, Classification::Unclassified);
    }

    #[test]
    fn test_last_edit_wins() {
        let mut session = FormSession::new(InputMode::Lenient);
        session.set(Field::Total, "200");
        session.set(Field::Hdl, "50");
        let view = session.set(Field::Triglycerides, "150");
        assert_eq!(
            view.result().unwrap().classification,
            Classification::Band(RiskBand::NearOptimal)
        );

        let view = session.set(Field::Total, "300");
        assert_eq!(view.result().unwrap().ldl, 220.0);
        assert_eq!(
            view.result().unwrap().classification,
            Classification::Band(RiskBand::VeryHigh)
        );
    }

    #[test]
    fn test_strict_session_reports_invalid_field() {
        let mut session = FormSession::new(InputMode::Strict);
        let view = session.set(Field::Total, "200");
        assert_eq!(view, FormView::Invalid("HDL cholesterol is empty".to_string()));
    }
}
