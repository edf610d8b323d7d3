//! Line-driven terminal session around a [`SearchWidget`].
//!
//! Each input line is one widget event. Plain text replaces the query,
//! an empty line is Enter in the query field, and lines starting with `:`
//! are session commands.

use std::io::{BufRead, Write};

use crate::commands::write_results;
use crate::navigate::WriterNavigator;
use crate::widget::{Outcome, SearchWidget, WidgetEvent, WidgetState};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Event(WidgetEvent),
    Show,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);

    if line.is_empty() {
        return Input::Event(WidgetEvent::Submit);
    }
    let Some(command) = line.strip_prefix(':') else {
        return Input::Event(WidgetEvent::QueryChanged(line.to_string()));
    };

    let mut words = command.split_whitespace();
    match words.next() {
        Some("go") => Input::Event(WidgetEvent::Submit),
        Some("show") => Input::Show,
        Some("quit" | "q") => Input::Quit,
        Some("clear") => Input::Event(WidgetEvent::QueryChanged(String::new())),
        Some("select") => {
            let start = words.next().map(str::parse::<usize>);
            let end = words.next().map(str::parse::<usize>);
            match (start, end) {
                (Some(Ok(start)), None) => Input::Event(WidgetEvent::Select { start, end: start }),
                (Some(Ok(start)), Some(Ok(end))) => Input::Event(WidgetEvent::Select { start, end }),
                _ => Input::Invalid("Usage: :select START [END]".to_string()),
            }
        }
        Some(other) => Input::Invalid(format!("Unknown command: :{other}")),
        None => Input::Invalid("Empty command".to_string()),
    }
}

/// Run the session until navigation, `:quit`, or end of input.
///
/// The unfiltered list is printed first, as the widget renders it on
/// creation.
///
/// # Returns
///
/// The widget's final state.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    mut widget: SearchWidget,
) -> anyhow::Result<WidgetState> {
    write_results(out, "", widget.results(), false)?;

    for line in input.lines() {
        let line = line?;

        let event = match parse_line(&line) {
            Input::Event(event) => event,
            Input::Show => {
                let query = widget.search_state().last_query().unwrap_or_default().to_string();
                write_results(out, &query, widget.results(), true)?;
                continue;
            }
            Input::Quit => break,
            Input::Invalid(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let is_submit = event == WidgetEvent::Submit;
        let outcome = {
            let mut navigator = WriterNavigator::new(&mut *out);
            widget.handle(event, &mut navigator)
        };

        match outcome {
            Outcome::Recomputed => {
                let query = widget.search_state().last_query().unwrap_or_default().to_string();
                write_results(out, &query, widget.results(), false)?;
            }
            Outcome::Unchanged => {}
            Outcome::Selected(selection) => match selection.tag {
                Some(_) => writeln!(
                    out,
                    "Selected: {} (chars {}..{})",
                    widget.choice(),
                    selection.line.start,
                    selection.line.end
                )?,
                None => writeln!(out, "No entry at selection")?,
            },
            Outcome::Navigated(_) => break,
            Outcome::Ignored if is_submit => writeln!(out, "Nothing selected")?,
            Outcome::Ignored => {}
        }
    }

    out.flush()?;
    Ok(widget.state())
}
