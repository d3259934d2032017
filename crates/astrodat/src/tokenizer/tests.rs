use rstest::rstest;

use super::{TokenKind, Tokenizer};

fn tokenizer(text: &str) -> Tokenizer<&[u8]> {
    Tokenizer::new(text.as_bytes())
}

/// Tokenizer with an 8-byte buffer, small enough to force refills inside
/// ordinary tokens.
fn small(text: &str) -> Tokenizer<&[u8]> {
    Tokenizer::with_capacity(text.as_bytes(), 8)
}

#[test]
fn separated_names() {
    let mut tok = tokenizer("Normal Number2 Number3Number snake_case _prefixed");
    for expected in ["Normal", "Number2", "Number3Number", "snake_case", "_prefixed"] {
        assert_eq!(tok.next_token(), TokenKind::Name);
        assert_eq!(tok.name_value(), Some(expected));
    }
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn name_followed_by_units() {
    let mut tok = tokenizer("Quantity<unit>");
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.name_value(), Some("Quantity"));
    assert_eq!(tok.next_token(), TokenKind::BeginUnits);
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.name_value(), Some("unit"));
    assert_eq!(tok.next_token(), TokenKind::EndUnits);
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[rstest]
#[case("Foo")]
#[case("Foo2")]
#[case("_Foo")]
#[case("Foo_")]
fn names_across_buffer_boundaries(#[case] name: &str) {
    for spaces in 0..10 {
        let text = format!("{}{name}", " ".repeat(spaces));
        let mut tok = small(&text);
        assert_eq!(tok.next_token(), TokenKind::Name);
        assert_eq!(tok.name_value(), Some(name));
    }
}

#[test]
fn ascii_strings() {
    let mut tok = tokenizer("\"abc 123.456 {}<>\" \"\"");
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("abc 123.456 {}<>"));
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some(""));
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn standard_escapes() {
    let mut tok = tokenizer(r#""abc\\def\nghi\"jkl""#);
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("abc\\def\nghi\"jkl"));
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn unicode_escapes() {
    let mut tok = tokenizer("\"\\u00ef\" \"\\u0900\" \"\\udabc\"");
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("ï"));
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("\u{900}"));
    // A surrogate escape decodes to the replacement character.
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("\u{FFFD}"));
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn invalid_escape_is_an_error() {
    let mut tok = tokenizer(r#""abcdefghijklmnop\qrstuvwxyz""#);
    assert_eq!(tok.next_token(), TokenKind::Error);
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn unterminated_string_is_an_error() {
    let mut tok = tokenizer("\"abc");
    assert_eq!(tok.next_token(), TokenKind::Error);
}

#[rstest]
#[case(b"\"\xC3\xAF\xE0\xA4\x80\"", "ï\u{900}")]
#[case(b"\"\xC0\"", "\u{FFFD}")]
#[case(b"\"\xC3x\"", "\u{FFFD}")]
#[case(b"\"\xE0\xA0x\"", "\u{FFFD}")]
#[case(b"\"\xE0x\xB0\"", "\u{FFFD}\u{FFFD}")]
#[case(b"\"\xC3\xAF\xE0\xA0x\"", "ï\u{FFFD}")]
fn invalid_utf8_is_repaired(#[case] input: &[u8], #[case] expected: &str) {
    let mut tok = Tokenizer::new(input);
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some(expected));
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[rstest]
#[case("\"\"", "")]
#[case("\"abc\"", "abc")]
#[case(r#""a\\b""#, "a\\b")]
#[case(r#""a\"b""#, "a\"b")]
#[case("\"aBc\"", "aBc")]
#[case("\"ï\u{900}\"", "ï\u{900}")]
fn strings_across_buffer_boundaries(#[case] input: &str, #[case] expected: &str) {
    for spaces in 0..10 {
        let text = format!("{}{input}", " ".repeat(spaces));
        let mut tok = small(&text);
        assert_eq!(tok.next_token(), TokenKind::String);
        assert_eq!(tok.string_value(), Some(expected));
    }
}

#[test]
fn newlines_in_strings_are_normalized() {
    let mut tok = Tokenizer::new(b"\"a\r\nb\" \"c\rd\" \"e\n\nf\"".as_slice());
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("a\nb"));
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("c\nd"));
    // A raw line feed passes through untouched, without the rewrite pass.
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.string_value(), Some("e\n\nf"));
}

#[rstest]
#[case("0", 0.0, Some(0))]
#[case("0.0", 0.0, None)]
#[case("12345", 12345.0, Some(12345))]
#[case("12345.0", 12345.0, None)]
#[case("32.75", 32.75, None)]
#[case("1.2e6", 1_200_000.0, None)]
#[case("2.3e+6", 2_300_000.0, None)]
#[case("7.5e-1", 0.75, None)]
#[case("1.2E6", 1_200_000.0, None)]
#[case("1.5e2", 150.0, None)]
#[case("+5", 5.0, Some(5))]
#[case("+12345", 12345.0, Some(12345))]
#[case("+32.75", 32.75, None)]
#[case("-12345", -12345.0, Some(-12345))]
#[case("-32.75", -32.75, None)]
#[case("-7.5e-1", -0.75, None)]
fn number_literals(#[case] text: &str, #[case] value: f64, #[case] integer: Option<i32>) {
    let mut tok = tokenizer(text);
    assert_eq!(tok.next_token(), TokenKind::Number);
    assert_eq!(tok.number_value(), Some(value));
    assert_eq!(tok.integer_value(), integer);
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn negative_zero_keeps_its_sign() {
    for text in ["-0", "-0.0"] {
        let mut tok = tokenizer(text);
        assert_eq!(tok.next_token(), TokenKind::Number);
        let value = tok.number_value().unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_negative());
        assert_eq!(tok.integer_value(), None);
    }
}

#[rstest]
#[case("1", 1.0, true)]
#[case("-123", -123.0, true)]
#[case("1.", 1.0, false)]
#[case(".5", 0.5, false)]
#[case("-.5", -0.5, false)]
#[case("1e0", 1.0, false)]
#[case("1E+1", 10.0, false)]
#[case("5e-1", 0.5, false)]
#[case("-1e+1", -10.0, false)]
fn numbers_across_buffer_boundaries(#[case] text: &str, #[case] value: f64, #[case] integer: bool) {
    for spaces in 0..10 {
        let spaced = format!("{}{text}", " ".repeat(spaces));
        let mut tok = small(&spaced);
        assert_eq!(tok.next_token(), TokenKind::Number);
        assert_eq!(tok.number_value(), Some(value));
        assert_eq!(tok.integer_value().is_some(), integer);
    }
}

#[rstest]
#[case("+")]
#[case("-")]
#[case("+e")]
#[case("+E")]
#[case("-e")]
#[case(".")]
#[case("-.")]
fn invalid_numbers(#[case] text: &str) {
    let mut tok = tokenizer(text);
    assert_eq!(tok.next_token(), TokenKind::Error);
}

#[rstest]
#[case("1.25e")]
#[case("1.25E")]
#[case("1.25e+")]
#[case("1.25e-")]
fn trailing_exponent_is_rolled_back(#[case] text: &str) {
    let mut tok = tokenizer(text);
    assert_eq!(tok.next_token(), TokenKind::Number);
    assert_eq!(tok.number_value(), Some(1.25));
    assert_eq!(tok.integer_value(), None);
    // The marker is lexed again as a name.
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.name_value(), Some(&text[4..5]));
}

#[test]
fn number_ends_at_separator() {
    let mut tok = tokenizer("123{");
    assert_eq!(tok.next_token(), TokenKind::Number);
    assert_eq!(tok.integer_value(), Some(123));
    assert_eq!(tok.next_token(), TokenKind::BeginGroup);
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn integer_overflow_widens_to_double() {
    let mut tok = tokenizer("12345678901234");
    assert_eq!(tok.next_token(), TokenKind::Number);
    assert_eq!(tok.number_value(), Some(12_345_678_901_234.0));
    assert_eq!(tok.integer_value(), None);
}

#[test]
fn symbols_and_groups() {
    let mut tok = tokenizer("={}|[]<>");
    for expected in [
        TokenKind::Equals,
        TokenKind::BeginGroup,
        TokenKind::EndGroup,
        TokenKind::Bar,
        TokenKind::BeginArray,
        TokenKind::EndArray,
        TokenKind::BeginUnits,
        TokenKind::EndUnits,
        TokenKind::End,
    ] {
        assert_eq!(tok.next_token(), expected);
    }
}

#[test]
fn comments_are_skipped() {
    let mut tok = Tokenizer::new(b"Token1 # comment\nToken2 # \xC0\nToken3 # blah".as_slice());
    for expected in ["Token1", "Token2", "Token3"] {
        assert_eq!(tok.next_token(), TokenKind::Name);
        assert_eq!(tok.name_value(), Some(expected));
    }
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn long_comments_cross_buffer_boundaries() {
    for spaces in 0..10 {
        let text = format!("{}# really long comment here\n{{", " ".repeat(spaces));
        let mut tok = small(&text);
        assert_eq!(tok.next_token(), TokenKind::BeginGroup);
    }
}

#[test]
fn push_back_replays_one_token() {
    let mut tok = tokenizer("foo 42");
    assert_eq!(tok.next_token(), TokenKind::Name);
    tok.push_back();
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.name_value(), Some("foo"));
    assert_eq!(tok.next_token(), TokenKind::Number);
    assert_eq!(tok.integer_value(), Some(42));
}

#[test]
fn end_is_terminal() {
    let mut tok = tokenizer("x");
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.next_token(), TokenKind::End);
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn lexing_stops_after_an_error() {
    let mut tok = tokenizer("@ foo");
    assert_eq!(tok.next_token(), TokenKind::Error);
    assert_eq!(tok.next_token(), TokenKind::End);
    assert_eq!(tok.next_token(), TokenKind::End);
}

#[test]
fn overlong_token_reports_an_error() {
    let mut tok = small("abcdefghijklmnop");
    assert_eq!(tok.next_token(), TokenKind::Error);
    assert!(matches!(
        tok.source_error(),
        Some(crate::error::SourceError::TokenTooLong(8))
    ));
}

#[test]
fn line_numbers_track_every_convention() {
    let mut tok = Tokenizer::new(b"a\nb # comment\r\nc \"x\ny\" d".as_slice());
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.line_number(), 1);
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.line_number(), 2);
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.line_number(), 3);
    // The newline inside the string counts too.
    assert_eq!(tok.next_token(), TokenKind::String);
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.line_number(), 4);
}

#[test]
fn byte_order_mark_is_skipped() {
    let mut tok = tokenizer("\u{FEFF}Galaxy");
    assert_eq!(tok.next_token(), TokenKind::Name);
    assert_eq!(tok.name_value(), Some("Galaxy"));
}

#[test]
fn accessors_refuse_mismatched_kinds() {
    let mut tok = tokenizer("foo \"bar\" 42");
    tok.next_token();
    assert_eq!(tok.string_value(), None);
    assert_eq!(tok.number_value(), None);
    tok.next_token();
    assert_eq!(tok.name_value(), None);
    assert_eq!(tok.number_value(), None);
    tok.next_token();
    assert_eq!(tok.name_value(), None);
    assert_eq!(tok.string_value(), None);
}
