//! Input tokenization.
//!
//! Converts a raw input line into a [`Command`].

/// One line of input, split into a command word and its parameters.
///
/// Produced once per line and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    raw_input: String,
    command_word: String,
    rest: String,
    params: Vec<String>,
}

impl Command {
    /// The line exactly as received.
    #[must_use]
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// The first token, lowercased. Empty for a blank line.
    #[must_use]
    pub fn command_word(&self) -> &str {
        &self.command_word
    }

    /// Everything after the command word, joined with single spaces.
    #[must_use]
    pub fn rest(&self) -> &str {
        &self.rest
    }

    /// Everything after the command word, one entry per token.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Whether the line had no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.command_word.is_empty()
    }
}

/// Tokenizes player input.
pub struct CommandTokenizer;

impl CommandTokenizer {
    /// Tokenizes a raw input line.
    ///
    /// - Splits on runs of whitespace
    /// - Lowercases the command word only
    /// - Keeps parameters verbatim
    #[must_use]
    pub fn tokenize(input: &str) -> Command {
        let mut words = input.split_whitespace();
        let command_word = words.next().map(str::to_lowercase).unwrap_or_default();
        let params: Vec<String> = words.map(str::to_string).collect();

        Command {
            raw_input: input.to_string(),
            command_word,
            rest: params.join(" "),
            params,
        }
    }
}
