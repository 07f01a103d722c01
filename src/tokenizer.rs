/// A run of non-whitespace characters and its code-point offset in the text it
/// was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    text: &'a str,
    char_offset: usize,
}

impl<'a> Token<'a> {
    #[must_use]
    pub fn new(text: &'a str, char_offset: usize) -> Self { Self { text, char_offset } }

    #[must_use]
    pub fn text(&self) -> &'a str { self.text }

    #[must_use]
    pub fn char_offset(&self) -> usize { self.char_offset }
}

/// Splits text on whitespace runs, dropping the whitespace.
///
/// ```not_rust
/// " Hi  there!\n" -> ["Hi" @ 1, "there!" @ 5]
/// ```
pub fn whitespace_tokenizer(text: &str) -> Vec<Token<'_>> {
    let mut result = Vec::new();

    let mut token_start: Option<(usize, usize)> = None;
    for (char_index, (byte_index, c)) in text.char_indices().enumerate() {
        match (token_start, c.is_whitespace()) {
            (None, false) => token_start = Some((byte_index, char_index)),
            (Some((start_byte, start_char)), true) => {
                result.push(Token::new(&text[start_byte..byte_index], start_char));
                token_start = None;
            }
            _ => {}
        }
    }

    if let Some((start_byte, start_char)) = token_start {
        result.push(Token::new(&text[start_byte..], start_char));
    }

    result
}
