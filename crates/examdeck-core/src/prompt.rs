//! Blocking user prompts used by edit commands.
//!
//! The edit controller only sees the [`Prompt`] trait. Frontends answer with
//! modal dialogs; tests use the fixed or scripted implementations below.

use std::collections::VecDeque;

/// Synchronous confirmation and notice capability.
pub trait Prompt {
    /// Ask a yes/no question. Returns `true` to proceed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notice the user has to acknowledge.
    fn notify(&mut self, message: &str);
}

/// Says yes to everything. Notices are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Prompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }

    fn notify(&mut self, _message: &str) {}
}

/// Says no to everything. Notices are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysDeny;

impl Prompt for AlwaysDeny {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }

    fn notify(&mut self, _message: &str) {}
}

/// Replays queued answers and records everything it was asked.
///
/// When the queue runs dry it falls back to `default_answer`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    pub default_answer: bool,
    pub questions: Vec<String>,
    pub notices: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// A prompt that answers every question the same way.
    pub fn answering(answer: bool) -> Self {
        Self {
            default_answer: answer,
            ..Self::default()
        }
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_replays_then_defaults() {
        let mut prompt = ScriptedPrompt::new([true, false]);
        assert!(prompt.confirm("one?"));
        assert!(!prompt.confirm("two?"));
        assert!(!prompt.confirm("three?"));
        assert_eq!(prompt.questions, vec!["one?", "two?", "three?"]);

        prompt.notify("careful");
        assert_eq!(prompt.last_notice(), Some("careful"));
    }

    #[test]
    fn test_fixed_prompts() {
        assert!(AlwaysConfirm.confirm("?"));
        assert!(!AlwaysDeny.confirm("?"));
        assert!(ScriptedPrompt::answering(true).confirm("?"));
    }
}
