use crate::op::{InfixOperator, PrefixOperator};

#[test]
fn prefix_from_token() {
    assert_eq!(PrefixOperator::from_token("-"), Ok(PrefixOperator::Negate));
    assert_eq!(PrefixOperator::from_token("!"), Ok(PrefixOperator::Not));
    assert!(PrefixOperator::from_token("+").is_err());
}

#[test]
fn infix_from_token_and_display_agree() {
    for token in ["*", "/", "+", "-", "==", "!=", "<", ">"] {
        let op = InfixOperator::from_token(token).unwrap();
        assert_eq!(op.to_string(), token);
    }
}

#[test]
fn unknown_infix_operator() {
    let result = InfixOperator::from_token("%");
    assert_eq!(result, Err("Unknown infix operator: %".to_owned()));
}
