use regex::Regex;

/// Inserts sentence-final punctuation into raw recognition text.
///
/// The cloud recognizer emits Japanese proceedings text with unreliable
/// punctuation, so each configured polite verb ending (ました, します, ...)
/// is rewritten to carry exactly one terminal mark, and the fragment as a
/// whole is guaranteed to end with one. Normalization is idempotent.
pub struct PunctuationNormalizer {
    rules: Vec<(Regex, String)>,
    terminal_mark: String,
}

impl PunctuationNormalizer {
    pub fn new(sentence_suffixes: &[String], terminal_mark: &str) -> Self {
        let rules = sentence_suffixes
            .iter()
            .map(|suffix| {
                let pattern = format!(
                    "{}(?:{})?",
                    regex::escape(suffix),
                    regex::escape(terminal_mark)
                );
                // Suffixes are fixed literals, so compilation cannot fail.
                let re = Regex::new(&pattern).unwrap();
                (re, format!("{suffix}{terminal_mark}"))
            })
            .collect();
        Self {
            rules,
            terminal_mark: terminal_mark.to_string(),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut text = text.to_string();
        for (re, replacement) in &self.rules {
            text = re.replace_all(&text, replacement.as_str()).into_owned();
        }
        if !text.ends_with(&self.terminal_mark) {
            text.push_str(&self.terminal_mark);
        }
        text
    }
}
