//! Bracket balance check for custom logic input

/// Checks that every `(` has a matching `)` in order.
/// Characters other than brackets are ignored.
pub fn validate_brackets(expression: &str) -> bool {
    let mut stack = Vec::new();

    for ch in expression.chars() {
        match ch {
            '(' => stack.push(ch),
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            _ => {}
        }
    }

    stack.is_empty()
}
