/// Splits a line into space separated tokens, honouring double-quoted spans.
///
/// A `"` toggles between the unquoted and quoted states. Closing a quote always
/// emits the accumulated token, so `""` yields an empty token. Outside quotes a
/// run of spaces separates tokens and never produces empty ones. Escaped quotes
/// are not supported; an unterminated quote still emits what was collected.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                if !in_quotes {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            ' ' if !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_span_keeps_spaces() {
        assert_eq!(tokenize_line(r#"A "B C" D"#), vec!["A", "B C", "D"]);
    }

    #[test]
    fn test_consecutive_spaces_collapse() {
        assert_eq!(tokenize_line("  a   b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_unterminated_quote_emits_trailing_token() {
        assert_eq!(tokenize_line(r#"a "b c"#), vec!["a", "b c"]);
    }

    #[test]
    fn test_empty_quotes_emit_empty_token() {
        assert_eq!(tokenize_line(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn test_quote_glued_to_word_joins_token() {
        // No separator before the quote, so the prefix stays in the same token
        assert_eq!(tokenize_line(r#"x"y z" w"#), vec!["xy z", "w"]);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize_line("").is_empty());
    }
}
