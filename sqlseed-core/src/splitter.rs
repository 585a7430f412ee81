//! Splits `GO`-delimited scripts into executable batches.
//!
//! A delimiter line is any line whose trimmed, case-folded text *starts with*
//! `go`. A plain prefix test means a line such as `GOTO label` also ends a
//! batch; scripts in the wild do not put such lines at column zero often
//! enough to justify a tokenizer here.

/// Whether `line` terminates the current batch.
pub fn is_delimiter_line(line: &str) -> bool {
    line.trim()
        .as_bytes()
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"go"))
}

/// Empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Split script lines into batches.
///
/// Lines are concatenated verbatim, so they should keep their line
/// terminators (see [`split_script`]). Delimiter lines are dropped and blank
/// batches are never emitted.
pub fn split<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batches = Vec::new();
    let mut buffer = String::new();

    for line in lines {
        let line = line.as_ref();
        if is_delimiter_line(line) {
            flush(&mut buffer, &mut batches);
        } else {
            buffer.push_str(line);
        }
    }
    flush(&mut buffer, &mut batches);

    batches
}

/// Split raw script text, keeping each line's terminator.
pub fn split_script(text: &str) -> Vec<String> {
    split(text.split_inclusive('\n'))
}

fn flush(buffer: &mut String, batches: &mut Vec<String>) {
    if is_blank(buffer) {
        buffer.clear();
    } else {
        batches.push(std::mem::take(buffer));
    }
}

#[cfg(test)]
#[path = "tests/splitter_tests.rs"]
mod tests;
