#[cfg(test)]
mod scanner_tests {
    use pretty_assertions::assert_eq;
    use treelox as lox;

    use lox::error::{Diagnostics, LoxError};
    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        let actual: Vec<(&'static str, &str)> = tokens
            .iter()
            .map(|t| (t.token_type.name(), t.lexeme.as_str()))
            .collect();
        let expected: Vec<(&'static str, &str)> =
            expected.iter().map(|(tt, lex)| (tt.name(), *lex)).collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators_use_maximal_munch() {
        assert_token_sequence(
            "!= == <= >= ! = < > / // trailing comment",
            &[
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::BANG, "!"),
                (TokenType::EQUAL, "="),
                (TokenType::LESS, "<"),
                (TokenType::GREATER, ">"),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_numbers_only_take_a_dot_followed_by_digits() {
        let tokens: Vec<Token> = Scanner::new("123 45.67 8.")
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[0].token_type, TokenType::NUMBER(n) if n == 123.0));
        assert!(matches!(tokens[1].token_type, TokenType::NUMBER(n) if n == 45.67));
        assert!(matches!(tokens[2].token_type, TokenType::NUMBER(n) if n == 8.0));
        assert_eq!(tokens[2].lexeme, "8");
        assert_eq!(tokens[3].token_type, TokenType::DOT);
        assert_eq!(tokens[4].token_type, TokenType::EOF);
    }

    #[test]
    fn test_scanner_04_keywords_win_over_identifiers() {
        assert_token_sequence(
            "and andy _x or9 class fun this super",
            &[
                (TokenType::AND, "and"),
                (TokenType::IDENTIFIER, "andy"),
                (TokenType::IDENTIFIER, "_x"),
                (TokenType::IDENTIFIER, "or9"),
                (TokenType::CLASS, "class"),
                (TokenType::FUN, "fun"),
                (TokenType::THIS, "this"),
                (TokenType::SUPER, "super"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_strings_have_no_escapes_and_may_span_lines() {
        let tokens: Vec<Token> = Scanner::new("\"a\\n\" \"two\nlines\" x")
            .filter_map(Result::ok)
            .collect();

        assert!(matches!(&tokens[0].token_type, TokenType::STRING(s) if s == "a\\n"));
        assert!(matches!(&tokens[1].token_type, TokenType::STRING(s) if s == "two\nlines"));
        assert_eq!(tokens[1].line, 1);
        assert_eq!(tokens[2].lexeme, "x");
        assert_eq!(tokens[2].line, 2);
    }

    #[test]
    fn test_scanner_06_newlines_and_comments_advance_line_counter() {
        let tokens: Vec<Token> = Scanner::new("a // comment\n\nb\n")
            .filter_map(Result::ok)
            .collect();

        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let results: Vec<_> = Scanner::new(source).collect();

        // COMMA, DOT, error '$', LEFT_PAREN, error '#', EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $".to_string(),
                "[line 1] Error: Unexpected character: #".to_string(),
            ]
        );

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(token.token_type, expected_type);
                    assert_eq!(token.lexeme, expected_lexeme);
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_non_ascii_character_is_one_error() {
        let results: Vec<_> = Scanner::new("é;").collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(matches!(&results[1], Ok(t) if t.token_type == TokenType::SEMICOLON));
    }

    #[test]
    fn test_unterminated_string_reports_and_still_ends_with_eof() {
        let mut diagnostics = Diagnostics::new();
        let tokens = scan_tokens("print \"open\nended", &mut diagnostics);

        assert!(diagnostics.had_error());
        assert_eq!(
            diagnostics.errors()[0].to_string(),
            "[line 2] Error: Unterminated string."
        );

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["PRINT", "EOF"]);
    }

    #[test]
    fn test_token_display_matches_tokenize_output() {
        let tokens: Vec<String> = Scanner::new("var x = 3; \"hi\" 2.5")
            .filter_map(Result::ok)
            .map(|t| t.to_string())
            .collect();

        assert_eq!(
            tokens,
            vec![
                "VAR var null",
                "IDENTIFIER x null",
                "EQUAL = null",
                "NUMBER 3 3.0",
                "SEMICOLON ; null",
                "STRING \"hi\" hi",
                "NUMBER 2.5 2.5",
                "EOF  null",
            ]
        );
    }
}
