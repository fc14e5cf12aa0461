//! Interactive read-send-print loop.
//!
//! The loop is a small state machine:
//!
//! ```text
//! AwaitingInput --"bye"--> Exiting
//! AwaitingInput --other--> Exchanging --reply printed--> AwaitingInput
//! ```

use crate::error::AppResult;
use crate::port::SerialPortAdapter;
use crate::session::Session;
use std::io::{BufRead, Write};

/// Operator input that ends the session. Matched exactly, case-sensitive.
pub const EXIT_KEYWORD: &str = "bye";

/// Prompt written before every operator line.
pub const PROMPT: &str = "Enter a string (\"bye\" to exit): ";

/// Where the loop currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    Exchanging(String),
    Exiting,
}

/// How the loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The operator typed the exit keyword.
    Bye,
    /// The operator's input reached end-of-file.
    InputClosed,
}

/// Decide what to do with one operator line (terminator already removed).
pub fn classify(line: String) -> LoopState {
    if line == EXIT_KEYWORD {
        LoopState::Exiting
    } else {
        LoopState::Exchanging(line)
    }
}

/// Drive the session from `input` until the operator says `bye` or input ends.
///
/// Every reply is printed as `Serial reply: <reply>`; the reply carries its
/// own newline. The call inherits the blocking behaviour of
/// [`Session::receive_line`].
pub fn run<P, R, W>(session: &mut Session<P>, mut input: R, mut output: W) -> AppResult<LoopOutcome>
where
    P: SerialPortAdapter,
    R: BufRead,
    W: Write,
{
    writeln!(output)?;

    let mut state = LoopState::AwaitingInput;
    loop {
        state = match state {
            LoopState::AwaitingInput => {
                write!(output, "{PROMPT}")?;
                output.flush()?;
                match read_operator_line(&mut input)? {
                    Some(line) => classify(line),
                    None => {
                        writeln!(output)?;
                        return Ok(LoopOutcome::InputClosed);
                    }
                }
            }
            LoopState::Exchanging(line) => {
                session.send(&line)?;
                let reply = session.receive_line()?;
                write!(output, "Serial reply: {reply}")?;
                output.flush()?;
                LoopState::AwaitingInput
            }
            LoopState::Exiting => {
                writeln!(output, "bye bye")?;
                output.flush()?;
                return Ok(LoopOutcome::Bye);
            }
        };
    }
}

/// Read one line, stripping only its `\n` or `\r\n`. `None` on end-of-file.
fn read_operator_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_exact_keyword() {
        assert_eq!(classify("bye".into()), LoopState::Exiting);
        assert_eq!(classify("Bye".into()), LoopState::Exchanging("Bye".into()));
        assert_eq!(classify("bye ".into()), LoopState::Exchanging("bye ".into()));
        assert_eq!(classify(" bye".into()), LoopState::Exchanging(" bye".into()));
        assert_eq!(classify(String::new()), LoopState::Exchanging(String::new()));
    }

    #[test]
    fn test_read_operator_line_strips_only_terminator() {
        let mut input: &[u8] = b"  spaced  \r\nnext\nlast";
        assert_eq!(read_operator_line(&mut input).unwrap().as_deref(), Some("  spaced  "));
        assert_eq!(read_operator_line(&mut input).unwrap().as_deref(), Some("next"));
        assert_eq!(read_operator_line(&mut input).unwrap().as_deref(), Some("last"));
        assert_eq!(read_operator_line(&mut input).unwrap(), None);
    }
}
