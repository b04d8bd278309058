use super::prelude::{
    tokenize, tokenize_spanned, Constant, Function, Lexer, LexicalError, LexicalErrorType, Operator, Token
};

#[test]
fn test_precedence_example() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize("2+3*4")?;

    assert_eq!(tokens, vec![
        Token::Number(2.0),
        Token::Operator(Operator::Plus),
        Token::Number(3.0),
        Token::Operator(Operator::Star),
        Token::Number(4.0),
    ]);

    Ok(())
}

#[test]
fn test_numbers() -> std::result::Result<(), LexicalError> {
    let input = r#"
        10
        1.5
        .25
        7.
        10e5
        10.4E5
        1e-3
        2.5E+2
    "#;

    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    let tokens = vec![
        Token::Number(10.0),
        Token::Number(1.5),
        Token::Number(0.25),
        Token::Number(7.0),
        Token::Number(1000000.0),
        Token::Number(1040000.0),
        Token::Number(0.001),
        Token::Number(250.0),
    ];

    for (idx, token) in tokens.iter().enumerate() {
        let (_, next_token, _) = match lexer.next_token() {
            Some(Ok(next_token)) => next_token,
            Some(Err(err)) => {
                println!("stopped at {token:?} ({idx})");
                panic!("{err:?}")
            },
            None => panic!("input ended before {token:?} ({idx})")
        };

        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({:?}, {:?}) at {}",
            next_token, token, idx
        );
    }

    assert!(lexer.next_token().is_none());

    Ok(())
}

#[test]
fn test_exponent_needs_digits() -> std::result::Result<(), LexicalError> {
    // an `e` that does not start an exponent is the constant
    let tokens = tokenize("2e")?;
    assert_eq!(tokens, vec![Token::Number(2.0), Token::Constant(Constant::E)]);

    let tokens = tokenize("3*e")?;
    assert_eq!(tokens[2], Token::Constant(Constant::E));

    Ok(())
}

#[test]
fn test_invalid_numbers() {
    let inputs = [".", "1e+", "2E-x"];

    for input in inputs {
        let err = tokenize(input).expect_err(input);

        assert!(
            matches!(err.error, LexicalErrorType::InvalidNumber { .. }),
            "expected invalid number for {input}, got {:?}", err.error
        );
    }
}

#[test]
fn test_unexpected_character() {
    let err = tokenize("2 + 3 $ 4").unwrap_err();

    assert_eq!(err.error, LexicalErrorType::UnexpectedCharacter { ch: '$', position: 6 });
    assert_eq!((err.location.start, err.location.end), (6, 7));
}

#[test]
fn test_identifiers() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize("sin(pi) + max(x_1, _y, 2) - nan * inf / sinx")?;

    assert_eq!(tokens, vec![
        Token::Function(Function::Sin),
        Token::LParen,
        Token::Constant(Constant::Pi),
        Token::RParen,
        Token::Operator(Operator::Plus),
        Token::Function(Function::Max),
        Token::LParen,
        Token::Variable("x_1".into()),
        Token::Comma,
        Token::Variable("_y".into()),
        Token::Comma,
        Token::Number(2.0),
        Token::RParen,
        Token::Operator(Operator::Minus),
        Token::Constant(Constant::Nan),
        Token::Operator(Operator::Star),
        Token::Constant(Constant::Inf),
        Token::Operator(Operator::Slash),
        Token::Variable("sinx".into()),
    ]);

    Ok(())
}

#[test]
fn test_spans() -> std::result::Result<(), LexicalError> {
    let tokens = tokenize_spanned("  x ^ 12.5 = y")?;

    let spans = tokens.iter()
        .map(|(start, _, end)| (*start, *end))
        .collect::<Vec<_>>();

    assert_eq!(spans, vec![(2, 3), (4, 5), (6, 10), (11, 12), (13, 14)]);
    assert_eq!(tokens[3].1, Token::Operator(Operator::Equals));

    Ok(())
}

#[test]
fn test_every_function_is_recognized() -> std::result::Result<(), LexicalError> {
    for function in Function::ALL {
        let tokens = tokenize(function.name())?;

        assert_eq!(tokens, vec![Token::Function(*function)]);
    }

    Ok(())
}
