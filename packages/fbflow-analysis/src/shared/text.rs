//! Identifier word splitting
//!
//! Used by the naming validator to rebuild names in a target convention and
//! by the pattern detector to recognize I/O tokens inside block names.

/// Split an identifier into words on separators and camel-case boundaries
///
/// `"AI_Scaler"` -> `[AI, Scaler]`, `"analogInput"` -> `[analog, Input]`,
/// `"start-motor"` -> `[start, motor]`. Acronym runs stay together until a
/// lowercase letter follows: `"HTTPServer"` -> `[HTTP, Server]`.
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = if current.is_empty() {
            false
        } else if c.is_uppercase() {
            let prev_lower = chars[i - 1].is_lowercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            prev_lower || (chars[i - 1].is_uppercase() && next_lower)
        } else {
            false
        };
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
