//! Built-in prompt sets and prompt files.
//!
//! A prompt file holds one prompt per line; blank lines are ignored.

use std::path::Path;

use crate::error::{CoreError, Result};

pub const REFLECTION_PROMPTS: &[&str] = &[
    "Think of a time when you stood up for someone else.",
    "Think of a time when you did something really difficult.",
    "Think of a time when you helped someone in need.",
    "Think of a time when you did something truly selfless.",
];

pub const REFLECTION_QUESTIONS: &[&str] = &[
    "Why was this experience meaningful to you?",
    "Have you ever done anything like this before?",
    "How did you get started?",
    "How did you feel when it was complete?",
    "What made this time different than other times when you were not as successful?",
    "What is your favorite thing about this experience?",
    "What could you learn from this experience that applies to other situations?",
    "What did you learn about yourself through this experience?",
    "How can you keep this experience in mind in the future?",
];

pub const LISTING_PROMPTS: &[&str] = &[
    "Who are people that you appreciate?",
    "What are personal strengths of yours?",
    "Who are people that you have helped this week?",
    "When have you felt at peace this month?",
    "Who are some of your personal heroes?",
];

pub fn owned(set: &[&str]) -> Vec<String> {
    set.iter().map(|s| (*s).to_string()).collect()
}

/// Trimmed lines of `content`, skipping blanks and `#` comments.
pub fn parse_prompts(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read a prompt file.
///
/// # Errors
///
/// Returns [`CoreError::PromptFile`] if the file cannot be read.
pub fn load_prompt_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| CoreError::PromptFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_prompts(&content))
}

/// Prompts from `file` when given and non-empty, otherwise `builtin`.
///
/// # Errors
///
/// Returns [`CoreError::PromptFile`] if `file` is set but unreadable.
pub fn resolve(builtin: &[&str], file: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = file else {
        return Ok(owned(builtin));
    };
    let prompts = load_prompt_file(path)?;
    if prompts.is_empty() {
        tracing::warn!(path = %path.display(), "prompt file has no prompts, using built-in set");
        return Ok(owned(builtin));
    }
    tracing::debug!(path = %path.display(), count = prompts.len(), "loaded prompt file");
    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_skips_blank_lines() {
        let prompts = parse_prompts("first\n\n   \n  second  \r\nthird");
        assert_eq!(prompts, vec!["first", "second", "third"]);
    }

    #[test]
    fn parse_skips_comment_lines() {
        let prompts = parse_prompts("# gratitude\nWho helped you today?\n  # draft\n");
        assert_eq!(prompts, vec!["Who helped you today?"]);
    }

    #[test]
    fn resolve_prefers_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Who made you smile today?").unwrap();
        let prompts = resolve(LISTING_PROMPTS, Some(file.path())).unwrap();
        assert_eq!(prompts, vec!["Who made you smile today?"]);
    }

    #[test]
    fn resolve_falls_back_on_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let prompts = resolve(LISTING_PROMPTS, Some(file.path())).unwrap();
        assert_eq!(prompts.len(), LISTING_PROMPTS.len());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve(LISTING_PROMPTS, Some(&dir.path().join("missing.txt")));
        assert!(matches!(result, Err(CoreError::PromptFile { .. })));
    }

    #[test]
    fn builtin_sets_are_non_empty() {
        assert_eq!(REFLECTION_PROMPTS.len(), 4);
        assert_eq!(REFLECTION_QUESTIONS.len(), 9);
        assert_eq!(LISTING_PROMPTS.len(), 5);
    }
}
