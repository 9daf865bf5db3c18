//! `${name}` placeholder substitution.
//!
//! # Syntax
//!
//! - `${name}` - Substitutes the symbol `name` (`[A-Za-z0-9_]+`)
//! - `$$` - Renders as a literal `$`
//! - `$` followed by anything else is copied through unchanged, so nginx
//!   variables like `$host` or `$request_uri` need no escaping
//!
//! Substitution is total. An undefined symbol or a `${` that does not form a
//! valid placeholder is an error; rendered output never contains leftover
//! placeholder syntax.

use crate::symbols::SymbolTable;
use thiserror::Error;

/// Error type for template rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder named a symbol the table does not contain.
    #[error("unresolved placeholder '${{{name}}}' at byte {position}")]
    UndefinedVariable { name: String, position: usize },

    /// `${` was not followed by an identifier and a closing `}`.
    #[error("malformed placeholder '{text}' at byte {position}")]
    MalformedPlaceholder { text: String, position: usize },
}

/// Render `template`, substituting every `${name}` from `symbols`.
pub fn render_template(template: &str, symbols: &SymbolTable) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' {
            result.push(ch);
            continue;
        }

        match chars.peek() {
            Some((_, '$')) => {
                chars.next();
                result.push('$');
            }
            Some((_, '{')) => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if !closed || !is_identifier(&name) {
                    let mut text = format!("${{{}", name);
                    if closed {
                        text.push('}');
                    }
                    return Err(TemplateError::MalformedPlaceholder {
                        text,
                        position: pos,
                    });
                }

                match symbols.get(&name) {
                    Some(value) => result.push_str(value),
                    None => {
                        return Err(TemplateError::UndefinedVariable {
                            name,
                            position: pos,
                        });
                    }
                }
            }
            _ => result.push('$'),
        }
    }

    Ok(result)
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
