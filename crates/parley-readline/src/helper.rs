use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use parley_core::scenario::DraftField;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use strum::IntoEnumIterator;

use crate::command::COMMANDS;

const TOGGLE_FLAGS: &[&str] = &["suggestions", "trainer"];
const DRAFT_ACTIONS: &[&str] = &["set", "build", "discard"];

/// Completes command names, scenario ids, flags and draft fields.
#[derive(Clone)]
pub struct CliHelper {
    scenario_ids: Vec<String>,
}

impl CliHelper {
    pub fn new(scenario_ids: Vec<String>) -> Self {
        Self { scenario_ids }
    }

    /// Custom scenarios join the catalog while the REPL runs.
    pub fn set_scenario_ids(&mut self, ids: Vec<String>) {
        self.scenario_ids = ids;
    }

    /// Start of the word being typed, and the completions for it.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line.rfind(' ').map_or(0, |i| i + 1);
        let partial = &line[start..];
        let words: Vec<&str> = line[..start].split_whitespace().collect();

        let pool: Vec<String> = match words.as_slice() {
            [] if line.starts_with('/') => to_owned(COMMANDS),
            ["/start"] | ["/toggle"] => self.scenario_ids.clone(),
            ["/toggle", _] => to_owned(TOGGLE_FLAGS),
            ["/draft"] => to_owned(DRAFT_ACTIONS),
            ["/draft", "set"] => DraftField::iter().map(|f| f.to_string()).collect(),
            _ => Vec::new(),
        };
        let matches = pool.into_iter().filter(|c| c.starts_with(partial)).collect();
        (start, matches)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = line.len() - start;
        matches
            .into_iter()
            .find(|candidate| candidate.len() > typed)
            .map(|candidate| candidate[typed..].to_string())
    }
}

impl Validator for CliHelper {}
