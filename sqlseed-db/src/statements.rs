//! Splitting a batch into the individual statements it holds.
//!
//! Drivers execute a batch one statement at a time so a single duplicate
//! `CREATE` does not hide the rest of the batch. The splitter is lexical:
//! it only needs to know where a `;` terminates a statement.

/// Split `sql` on statement-terminating semicolons.
///
/// Semicolons inside quoted text (`'...'`, `"..."`, `` `...` ``, `[...]`),
/// line comments and block comments do not split. Inside
/// `CREATE [TEMP] TRIGGER` only a semicolon following `END` does. Pieces
/// holding nothing but whitespace and comments are dropped. Each piece keeps
/// its terminating semicolon.
pub fn split_statements(sql: &str) -> Vec<&str> {
    let bytes = sql.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;
    let mut leading: Vec<String> = Vec::new();
    let mut last_word = String::new();
    let mut has_token = false;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => {
                i = skip_past(bytes, i + 1, quote);
                has_token = true;
                last_word.clear();
            }
            b'[' => {
                i = skip_past(bytes, i + 1, b']');
                has_token = true;
                last_word.clear();
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = skip_past(bytes, i + 2, b'\n');
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = match sql[i + 2..].find("*/") {
                    Some(end) => i + 2 + end + 2,
                    None => bytes.len(),
                };
            }
            b';' => {
                if !is_trigger(&leading) || last_word == "END" {
                    if has_token {
                        pieces.push(&sql[start..=i]);
                    }
                    start = i + 1;
                    leading.clear();
                    has_token = false;
                }
                last_word.clear();
                i += 1;
            }
            b if is_word_byte(b) => {
                let word_start = i;
                while i < bytes.len() && is_word_byte(bytes[i]) {
                    i += 1;
                }
                let word = sql[word_start..i].to_ascii_uppercase();
                if leading.len() < 3 {
                    leading.push(word.clone());
                }
                last_word = word;
                has_token = true;
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                has_token = true;
                last_word.clear();
                i += 1;
            }
        }
    }

    if has_token {
        pieces.push(&sql[start..]);
    }
    pieces
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Index just past the next `close` at or after `from`, or the end of input.
fn skip_past(bytes: &[u8], from: usize, close: u8) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .position(|&b| b == close)
        .map_or(bytes.len(), |pos| from + pos + 1)
}

fn is_trigger(leading: &[String]) -> bool {
    match leading {
        [create, trigger, ..] if create == "CREATE" && trigger == "TRIGGER" => true,
        [create, temp, trigger]
            if create == "CREATE"
                && (temp == "TEMP" || temp == "TEMPORARY")
                && trigger == "TRIGGER" =>
        {
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/statements_tests.rs"]
mod tests;
