//! Interactive write-back confirmation

use std::io::{self, BufRead, Write};

pub const SAVE_PROMPT: &str = "\nDo you want to save the sig files to disk in the save folder?\n\
WARNING: this will overwrite existing sig files if any. (Y/N): ";

/// Print `question`, read one line, accept only `y`/`Y`.
///
/// EOF or a read error counts as "no".
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> bool {
    if write!(output, "{question}").and_then(|_| output.flush()).is_err() {
        return false;
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => line.trim().eq_ignore_ascii_case("y"),
    }
}

/// `confirm` on the process's stdin/stdout.
pub fn confirm_stdio(question: &str) -> bool {
    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm(&mut stdin.lock(), &mut stdout.lock(), question)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(s: &str) -> bool {
        let mut out = Vec::new();
        confirm(&mut s.as_bytes(), &mut out, "? ")
    }

    #[test]
    fn accepts_y_either_case() {
        assert!(answer("y\n"));
        assert!(answer("  Y \n"));
    }

    #[test]
    fn rejects_everything_else() {
        assert!(!answer("n\n"));
        assert!(!answer("yes\n"));
        assert!(!answer(""));
    }

    #[test]
    fn question_is_printed() {
        let mut out = Vec::new();
        confirm(&mut "n\n".as_bytes(), &mut out, "Save? ");
        assert_eq!(out, b"Save? ");
    }
}
