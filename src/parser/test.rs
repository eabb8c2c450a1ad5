use crate::expr::{Formula, Mode, Modality};
use crate::parser::ParseContext;

fn parse(input: &str) -> Formula {
    ParseContext::new().formula(input).unwrap()
}

fn rejects(input: &str) {
    assert!(ParseContext::new().formula(input).is_err(), "Parsed: {input}");
}

#[test]
fn atoms_and_constants() {
    assert!(matches!(parse("p"), Formula::Atom(_)));
    assert_eq!(parse("True"), Formula::True);
    assert_eq!(parse("False"), Formula::False);

    // Only the exact keyword spelling is reserved
    assert!(matches!(parse("true"), Formula::Atom(_)));
}

#[test]
fn same_ident_same_name() {
    let mut pc = ParseContext::new();

    let a = pc.formula("p").unwrap();
    let b = pc.formula("p").unwrap();

    assert_eq!(a, b);
}

#[test]
fn precedence() {
    // & binds tighter than |, | tighter than =>
    let exp = parse("a => b | c & d");

    let mut pc = ParseContext::new();
    let a = pc.formula("a").unwrap();
    let b = pc.formula("b").unwrap();
    let c = pc.formula("c").unwrap();
    let d = pc.formula("d").unwrap();

    assert_eq!(exp, Formula::imp(a, b | (c & d)));
}

#[test]
fn imp_right_associative() {
    let exp = parse("a => b => c");

    let mut pc = ParseContext::new();
    let a = pc.formula("a").unwrap();
    let b = pc.formula("b").unwrap();
    let c = pc.formula("c").unwrap();

    assert_eq!(exp, Formula::imp(a, Formula::imp(b, c)));
}

#[test]
fn modalities() {
    let exp = parse("[r]p");
    match exp {
        Formula::Modal(Modality { mode: Mode::Box, .. }, _) => {}
        other => panic!("Expected a box, got {other:?}")
    }

    let exp = parse("<r>p");
    match exp {
        Formula::Modal(Modality { mode: Mode::Dia, .. }, _) => {}
        other => panic!("Expected a diamond, got {other:?}")
    }
}

#[test]
fn empty_modality_id() {
    assert!(matches!(parse("[]p"), Formula::Modal(_, _)));
    assert!(matches!(parse("<>p"), Formula::Modal(_, _)));
}

#[test]
fn modality_binds_like_negation() {
    // ~[r]p is ~([r]p)
    let exp = parse("~[r]p");
    assert!(matches!(exp, Formula::Not(_)));
}

#[test]
fn iff_lexes_against_diamond() {
    // '<' starts both '<=>' and '<id>'
    let exp = parse("p <=> <r>q");
    assert!(matches!(exp, Formula::Iff(_, _)));
}

#[test]
fn skips_quotes_and_whitespace() {
    let mut pc = ParseContext::new();

    let quoted = pc.formula("\"p & q\"").unwrap();
    let plain = pc.formula("p\t&\n q").unwrap();

    assert_eq!(quoted, plain);
}

#[test]
fn rejects_garbage() {
    rejects("");
    rejects("p &");
    rejects("(p | q");
    rejects("p q");
    rejects("[r p");
    rejects("p => ");
    rejects("p ? q");
}

#[test]
fn error_carries_position() {
    let err = ParseContext::new().formula("p &\n& q").unwrap_err();

    assert_eq!(err.at.line, 2);
}
