use std::fmt;

use crate::evaluator::env::EnvRef;

/// Why a piece of raw argument text could not be resolved to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    StrayDollar,
    EmptyRef,
    UnterminatedRef,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::StrayDollar => {
                write!(f, "stray '$' (write '$$' for a literal dollar)")
            }
            ExprError::EmptyRef => write!(f, "empty variable reference '${{}}'"),
            ExprError::UnterminatedRef => write!(f, "unterminated '${{' reference"),
        }
    }
}

impl std::error::Error for ExprError {}

/// Resolve raw argument text to a concrete value.
///
/// Plain text passes through verbatim. `$name` and `${name}` splice in the
/// variable's value, the empty string when the variable is absent. `$$`
/// produces a literal `$`.
pub fn eval(env: &EnvRef, raw: &str) -> Result<String, ExprError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(ExprError::UnterminatedRef),
                    }
                }
                if name.is_empty() {
                    return Err(ExprError::EmptyRef);
                }
                out.push_str(&lookup(env, &name));
            }
            Some(c) if c.is_ascii_alphabetic() || *c == '_' => {
                let mut name = String::new();
                while let Some(c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || *c == '_' {
                        name.push(*c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(&lookup(env, &name));
            }
            _ => return Err(ExprError::StrayDollar),
        }
    }

    Ok(out)
}

fn lookup(env: &EnvRef, name: &str) -> String {
    env.borrow().get(name).unwrap_or_default()
}
