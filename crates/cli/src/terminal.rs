//! Terminal operator - shows posts on stdout and reads decisions from stdin

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use trendpost_domain::{Operator, OperatorError, SanitizedPost};

pub struct TerminalOperator {
    input: Mutex<BufReader<Stdin>>,
}

impl TerminalOperator {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for TerminalOperator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Operator for TerminalOperator {
    async fn present(&self, post: &SanitizedPost) -> Result<(), OperatorError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "\nGenerated LinkedIn Post:\n")?;
        writeln!(stdout, "{}", post)?;
        stdout.flush()?;
        Ok(())
    }

    async fn ask(&self, question: &str) -> Result<Option<String>, OperatorError> {
        {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{}", question)?;
            stdout.flush()?;
        }

        let mut input = self.input.lock().await;
        read_decision_line(&mut *input).await
    }

    async fn notify(&self, message: &str) -> Result<(), OperatorError> {
        println!("{}", message);
        Ok(())
    }
}

/// Read one line, decoding invalid UTF-8 lossily. `None` means end of input.
async fn read_decision_line<R>(reader: &mut R) -> Result<Option<String>, OperatorError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_decision_line_splits_lines() {
        let mut reader: &[u8] = b"p\r\nq\n";

        assert_eq!(read_decision_line(&mut reader).await.unwrap().as_deref(), Some("p"));
        assert_eq!(read_decision_line(&mut reader).await.unwrap().as_deref(), Some("q"));
        assert_eq!(read_decision_line(&mut reader).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_decision_line_accepts_invalid_utf8() {
        let mut reader: &[u8] = b"\xff\nq\n";

        let line = read_decision_line(&mut reader).await.unwrap().unwrap();
        assert_eq!(line, "\u{fffd}");
        assert_eq!(read_decision_line(&mut reader).await.unwrap().as_deref(), Some("q"));
    }

    #[tokio::test]
    async fn test_read_decision_line_without_trailing_newline() {
        let mut reader: &[u8] = b"r";

        assert_eq!(read_decision_line(&mut reader).await.unwrap().as_deref(), Some("r"));
        assert_eq!(read_decision_line(&mut reader).await.unwrap(), None);
    }
}
