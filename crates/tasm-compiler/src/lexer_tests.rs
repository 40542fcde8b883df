use super::*;

fn kinds(line: &str) -> Vec<(TokenKind, &str)> {
    lex(line)
        .iter()
        .map(|t| (t.kind, t.text(line)))
        .collect()
}

#[test]
fn instruction_with_comment() {
    assert_eq!(
        kinds("PUSH -12 ; twelve"),
        [(TokenKind::Ident, "PUSH"), (TokenKind::Int, "-12")]
    );
}

#[test]
fn operand_forms() {
    assert_eq!(
        kinds("x3 fx1 :loop [x2] 'a' 2.5e3"),
        [
            (TokenKind::Register, "x3"),
            (TokenKind::Register, "fx1"),
            (TokenKind::Label, ":loop"),
            (TokenKind::BracketOpen, "["),
            (TokenKind::Register, "x2"),
            (TokenKind::BracketClose, "]"),
            (TokenKind::Char, "'a'"),
            (TokenKind::Float, "2.5e3"),
        ]
    );
}

#[test]
fn register_prefix_inside_identifier() {
    assert_eq!(kinds("x1y"), [(TokenKind::Ident, "x1y")]);
}

#[test]
fn quote_byte_is_one_char_token() {
    assert_eq!(
        kinds("PUSH '''"),
        [(TokenKind::Ident, "PUSH"), (TokenKind::Char, "'''")]
    );
    assert_eq!(kinds("''"), [(TokenKind::Char, "''")]);
}

#[test]
fn unterminated_char_and_empty_label() {
    assert_eq!(
        kinds(": 'a"),
        [(TokenKind::Label, ":"), (TokenKind::Char, "'a")]
    );
}

#[test]
fn garbage_is_coalesced() {
    assert_eq!(
        kinds("PUSH $%& 1"),
        [
            (TokenKind::Ident, "PUSH"),
            (TokenKind::Garbage, "$%&"),
            (TokenKind::Int, "1"),
        ]
    );
}
