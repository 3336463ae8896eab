//! Message tokenizer feeding the time-expression parser.

/// Kind of a lexed token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of ASCII digits.
    Number,
    /// A run of alphabetic characters and underscores.
    Word,
    Colon,
    /// A well-formed user mention, `<@id>` or `<@!id>`.
    Mention(u64),
    /// Any other single character.
    Punct(char),
}

/// One token with its source slice and position metadata.
#[derive(Clone, Debug)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the token start in the source message.
    pub start: usize,
    /// Byte offset one past the token end.
    pub end: usize,
    /// Whether whitespace (or the start of input) immediately precedes it.
    pub space_before: bool,
}

impl Token<'_> {
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(word)
    }

    /// Numeric value, for `Number` tokens short enough to be a clock field.
    pub fn number(&self) -> Option<u32> {
        match self.kind {
            TokenKind::Number => self.text.parse::<u32>().ok(),
            _ => None,
        }
    }
}

/// Splits a message into tokens. Alphanumeric runs are split at the
/// digit/letter boundary, so `8:15pm` lexes as number, colon, number, word.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    let mut space_before = true;

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            space_before = true;
            chars.next();
            continue;
        }

        let token = if c.is_ascii_digit() {
            let end = consume_while(&mut chars, |c| c.is_ascii_digit());
            Token {
                kind: TokenKind::Number,
                text: &input[start..end],
                start,
                end,
                space_before,
            }
        } else if c.is_alphabetic() || c == '_' {
            let end = consume_while(&mut chars, |c| c.is_alphabetic() || c == '_');
            Token {
                kind: TokenKind::Word,
                text: &input[start..end],
                start,
                end,
                space_before,
            }
        } else if c == ':' {
            chars.next();
            Token {
                kind: TokenKind::Colon,
                text: &input[start..start + 1],
                start,
                end: start + 1,
                space_before,
            }
        } else if c == '<' {
            match lex_mention(input, start) {
                Some((id, end)) => {
                    while chars.peek().is_some_and(|&(i, _)| i < end) {
                        chars.next();
                    }
                    Token {
                        kind: TokenKind::Mention(id),
                        text: &input[start..end],
                        start,
                        end,
                        space_before,
                    }
                }
                None => {
                    chars.next();
                    Token {
                        kind: TokenKind::Punct('<'),
                        text: &input[start..start + 1],
                        start,
                        end: start + 1,
                        space_before,
                    }
                }
            }
        } else {
            chars.next();
            let end = start + c.len_utf8();
            Token {
                kind: TokenKind::Punct(c),
                text: &input[start..end],
                start,
                end,
                space_before,
            }
        };

        tokens.push(token);
        space_before = false;
    }

    tokens
}

fn consume_while(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    pred: impl Fn(char) -> bool,
) -> usize {
    let mut end = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !pred(c) {
            return i;
        }
        end = i + c.len_utf8();
        chars.next();
    }
    end
}

/// Lexes `<@id>` / `<@!id>` starting at `start`, returning the user ID and
/// the end offset.
fn lex_mention(input: &str, start: usize) -> Option<(u64, usize)> {
    let rest = &input[start..];
    let body = rest.strip_prefix("<@")?;
    let body = body.strip_prefix('!').unwrap_or(body);

    let digits_len = body.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits_len == 0 || !body[digits_len..].starts_with('>') {
        return None;
    }

    let id = body[..digits_len].parse::<u64>().ok()?;
    let consumed = rest.len() - body.len() + digits_len + 1;
    Some((id, start + consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_splits_clock_time_at_digit_letter_boundary() {
        assert_eq!(
            kinds("8:15pm"),
            vec![
                TokenKind::Number,
                TokenKind::Colon,
                TokenKind::Number,
                TokenKind::Word,
            ]
        );
    }

    #[test]
    fn test_space_before_tracking() {
        let tokens = tokenize("at 6pm");
        assert!(tokens[0].space_before);
        assert!(tokens[1].space_before);
        assert!(!tokens[2].space_before); // "pm" glued to "6"
    }

    #[test]
    fn test_lexes_mentions() {
        let tokens = tokenize("for <@!123456789>");
        assert_eq!(tokens[1].kind, TokenKind::Mention(123456789));
        assert_eq!(tokens[1].text, "<@!123456789>");

        // Malformed mention degrades to punctuation
        let tokens = tokenize("<@abc>");
        assert_eq!(tokens[0].kind, TokenKind::Punct('<'));
    }

    #[test]
    fn test_handles_non_ascii_text() {
        let tokens = tokenize("⚔️ engarde 6pm");
        assert!(tokens.iter().any(|t| t.is_word("engarde")));
        assert!(tokens.iter().any(|t| t.number() == Some(6)));
    }
}
