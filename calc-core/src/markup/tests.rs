use crate::{
    parser::prelude::{parse_expression, parse_str, ParseError},
    utils::prelude::SrcSpan
};

use super::prelude::{has_markup, normalize, normalize_reporting, prepare, UnknownMacro};

#[test]
fn test_plain_text_is_untouched() {
    assert!(!has_markup("2 * (x + 1)"));
    assert!(matches!(prepare("2 * (x + 1)"), std::borrow::Cow::Borrowed("2 * (x + 1)")));
}

#[test]
fn test_rewrites() {
    assert_eq!(normalize(r"\frac{1}{2}"), "((1)/(2))");
    assert_eq!(normalize(r"\frac12"), "((1)/(2))");
    assert_eq!(normalize(r"\sqrt{x}"), "sqrt(x)");
    assert_eq!(normalize(r"\sqrt[3]{8}"), "((8)^(1/(3)))");
    assert_eq!(normalize(r"\left( x \right)"), "( x )");
    assert_eq!(normalize(r"2 \cdot 3 \times 4 \div 5"), "2 * 3 * 4 / 5");
    assert_eq!(normalize(r"[x]"), "(x)");
}

#[test]
fn test_normalized_text_parses() -> Result<(), ParseError> {
    let cases = [
        (r"\frac{x + 1}{2}", "(x + 1) / 2"),
        (r"\sqrt[3]{x}", "x ^ (1 / 3)"),
        (r"2 \cdot \pi", "2 * pi"),
        (r"\sin{\theta}", "sin(theta)"),
        (r"\left[ a + b \right] \cdot c", "(a + b) * c"),
    ];

    for (markup, plain) in cases {
        assert_eq!(parse_expression(markup)?, parse_str(plain)?, "{markup}");
    }

    // no implicit multiplication
    assert!(parse_expression(r"2 \pi").is_err());

    Ok(())
}

#[test]
fn test_unknown_macros_are_reported() {
    let normalized = normalize_reporting(r"x + \foo");

    assert_eq!(normalized.text.trim_end(), "x +  foo");
    assert_eq!(normalized.unknown, vec![UnknownMacro {
        name: "foo".to_string(),
        span: SrcSpan::from(4, 8),
    }]);

    assert!(normalize_reporting(r"\alpha + \Omega").unknown.is_empty());
}
