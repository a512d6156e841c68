//! Text prompts, the way a page asks the user for input.

use std::collections::VecDeque;

/// Asks the user for a line of text.
///
/// `None` means the user cancelled. `default` pre-fills the answer.
pub trait Prompter {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        (**self).prompt(message, default)
    }
}

/// Replays canned answers in order and records what was asked.
///
/// Once the answers run out every further prompt is cancelled.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    asked: Vec<(String, Option<String>)>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
            asked: Vec::new(),
        }
    }

    /// Queue one more answer.
    pub fn push(&mut self, answer: Option<&str>) {
        self.answers.push_back(answer.map(str::to_string));
    }

    /// Every prompt shown so far with its default.
    pub fn asked(&self) -> &[(String, Option<String>)] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        self.asked
            .push((message.to_string(), default.map(str::to_string)));
        self.answers.pop_front().flatten()
    }
}
