//! # Console
//!
//! Line-oriented prompts over any async reader/writer pair.
//!
//! The binary wires this to stdin/stdout/stderr; tests wire it to byte
//! slices and `Vec<u8>` buffers.

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stderr, Stdin, Stdout,
};

use crate::error::{CliError, CliResult};
use stockroom_core::validation::ValidationResult;

/// Prompt/response console.
#[derive(Debug)]
pub struct Console<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl Console<BufReader<Stdin>, Stdout, Stderr> {
    /// Console bound to the process's standard streams.
    pub fn stdio() -> Self {
        Console::new(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            tokio::io::stderr(),
        )
    }
}

impl<R, W, E> Console<R, W, E>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W, err: E) -> Self {
        Console { input, out, err }
    }

    /// Reads one line without its line terminator.
    ///
    /// Bytes that are not valid UTF-8 become U+FFFD.
    /// Returns `CliError::InputClosed` at end of input.
    pub async fn read_line(&mut self) -> CliResult<String> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw).await? == 0 {
            return Err(CliError::InputClosed);
        }

        let mut line = String::from_utf8_lossy(&raw).into_owned();
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Writes `label` (no newline) and reads the answer.
    pub async fn prompt(&mut self, label: &str) -> CliResult<String> {
        self.out.write_all(label.as_bytes()).await?;
        self.out.flush().await?;
        self.read_line().await
    }

    /// Prompts until `parse` accepts the answer.
    ///
    /// Each rejected answer prints the parse error as a notice and asks
    /// again for the same field.
    pub async fn prompt_parsed<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> ValidationResult<T>,
    ) -> CliResult<T> {
        loop {
            let answer = self.prompt(label).await?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => self.notice(&e.to_string()).await?,
            }
        }
    }

    /// Writes a line to the output stream.
    pub async fn notice(&mut self, text: &str) -> CliResult<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    /// Writes a line to the error stream.
    pub async fn error(&mut self, text: &str) -> CliResult<()> {
        self.err.write_all(text.as_bytes()).await?;
        self.err.write_all(b"\n").await?;
        self.err.flush().await?;
        Ok(())
    }

    /// Releases the underlying streams.
    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.out, self.err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::validation::parse_quantity;

    fn console(input: &[u8]) -> Console<&[u8], Vec<u8>, Vec<u8>> {
        Console::new(input, Vec::new(), Vec::new())
    }

    #[tokio::test]
    async fn test_read_line_strips_terminators() {
        let mut console = console(b"first\r\nsecond\nlast");
        assert_eq!(console.read_line().await.unwrap(), "first");
        assert_eq!(console.read_line().await.unwrap(), "second");
        assert_eq!(console.read_line().await.unwrap(), "last");
        assert!(matches!(
            console.read_line().await,
            Err(CliError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn test_read_line_keeps_inner_whitespace() {
        let mut console = console(b"  spaced  name \n\n");
        assert_eq!(console.read_line().await.unwrap(), "  spaced  name ");
        assert_eq!(console.read_line().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_read_line_replaces_invalid_utf8() {
        let mut console = console(b"caf\xe9\nnext\n");
        assert_eq!(console.read_line().await.unwrap(), "caf\u{FFFD}");
        assert_eq!(console.read_line().await.unwrap(), "next");
    }

    #[tokio::test]
    async fn test_prompt_parsed_reprompts_on_bad_input() {
        let mut console = console(b"ten\n2.5\n10\n");
        let quantity = console
            .prompt_parsed("Quantity: ", parse_quantity)
            .await
            .unwrap();
        assert_eq!(quantity, 10);

        let (_, out, err) = console.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Quantity: ").count(), 3);
        assert!(out.contains("quantity must be a whole number, got 'ten'"));
        assert!(out.contains("quantity must be a whole number, got '2.5'"));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_parsed_stops_at_end_of_input() {
        let mut console = console(b"ten\n");
        let result = console.prompt_parsed("Quantity: ", parse_quantity).await;
        assert!(matches!(result, Err(CliError::InputClosed)));
    }

    #[tokio::test]
    async fn test_error_goes_to_error_stream() {
        let mut console = console(b"");
        console.error("Query failed: boom").await.unwrap();

        let (_, out, err) = console.into_parts();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Query failed: boom\n");
    }
}
