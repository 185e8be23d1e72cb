//! Linter process pipeline.
//!
//! One linter process is spawned per request. The buffer text goes to its
//! standard input while standard output and standard error are drained
//! concurrently; the collected output is only returned once standard output
//! reaches end-of-stream.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tracing::{debug, trace};

use crate::error::ProcessError;

const CHUNK_SIZE: usize = 8 * 1024;

/// How to invoke the linter for one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterCommand {
    /// Executable path or name.
    pub program: String,
    /// File name the linter resolves configuration against.
    pub file_name: String,
}

impl LinterCommand {
    pub fn new(program: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            file_name: file_name.into(),
        }
    }

    /// Arguments requesting JSON output for a file read from stdin.
    pub fn args(&self) -> Vec<String> {
        vec![
            "-f".to_string(),
            "json".to_string(),
            "--stdin".to_string(),
            "--stdin-filename".to_string(),
            self.file_name.clone(),
        ]
    }
}

/// Runs the linter over `text` and returns everything it wrote to stdout.
///
/// Output written to stderr fails the run.
pub async fn run_linter(command: &LinterCommand, text: &str) -> Result<String, ProcessError> {
    debug!("Spawning {} for {}", command.program, command.file_name);

    let mut child = Command::new(&command.program)
        .args(command.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    let stdin = child.stdin.take().ok_or_else(|| missing_pipe("stdin"))?;
    let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
    let stderr = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;

    let (output, errors, ()) = tokio::try_join!(
        collect_stream(stdout, "stdout"),
        collect_stream(stderr, "stderr"),
        write_input(stdin, text.as_bytes()),
    )?;

    let status = child.wait().await?;
    debug!(
        "{} exited with {} ({} bytes of output)",
        command.program,
        status,
        output.len()
    );

    if !errors.trim().is_empty() {
        return Err(ProcessError::Stderr(errors.trim().to_string()));
    }

    Ok(output)
}

fn missing_pipe(name: &str) -> ProcessError {
    ProcessError::Io(io::Error::other(format!("{} was not captured", name)))
}

/// Accumulates chunks until a zero-length read signals end-of-stream.
async fn collect_stream<R>(mut reader: R, name: &'static str) -> io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut collected = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut chunks = 0usize;

    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        chunks += 1;
        collected.extend_from_slice(&chunk[..read]);
    }

    trace!("{}: {} chunk(s), {} bytes", name, chunks, collected.len());
    Ok(String::from_utf8_lossy(&collected).into_owned())
}

/// Writes the whole input, then closes stdin.
///
/// A linter that exits without reading its input closes the pipe early;
/// that is not an error, its output still tells what went wrong.
async fn write_input(mut stdin: ChildStdin, input: &[u8]) -> io::Result<()> {
    match stdin.write_all(input).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Linter closed stdin before reading all input");
            return Ok(());
        }
        Err(e) => return Err(e),
    }

    match stdin.shutdown().await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => return Err(e),
    }
    drop(stdin);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let command = LinterCommand::new("eslint_d", "/project/src/app.tsx");
        assert_eq!(
            command.args(),
            vec!["-f", "json", "--stdin", "--stdin-filename", "/project/src/app.tsx"]
        );
    }

    #[tokio::test]
    async fn test_collect_stream_across_chunks() {
        let data = "x".repeat(CHUNK_SIZE * 2 + 17);
        let cursor = std::io::Cursor::new(data.clone().into_bytes());
        let collected = collect_stream(cursor, "test").await.unwrap();
        assert_eq!(collected, data);
    }

    #[tokio::test]
    async fn test_collect_stream_keeps_split_multibyte_chars() {
        // Two-byte reads split every 'あ' across chunks
        let data = "あいう".as_bytes().to_vec();
        let (mut tx, rx) = tokio::io::duplex(2);
        let writer = tokio::spawn(async move {
            tx.write_all(&data).await.unwrap();
        });
        let collected = collect_stream(rx, "test").await.unwrap();
        writer.await.unwrap();
        assert_eq!(collected, "あいう");
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let command = LinterCommand::new("/nonexistent/lintbridge-linter", "a.js");
        let err = run_linter(&command, "let a;").await.unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/lintbridge-linter"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};

        fn write_script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-linter");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn command(script: &Path) -> LinterCommand {
            LinterCommand::new(script.display().to_string(), "/project/a.js")
        }

        #[tokio::test]
        async fn test_stdin_reaches_linter() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "cat");

            let output = run_linter(&command(&script), "const a = 1;\nconst b = 2;")
                .await
                .unwrap();
            assert_eq!(output, "const a = 1;\nconst b = 2;");
        }

        #[tokio::test]
        async fn test_large_input_does_not_deadlock() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "cat");
            let text = "let value = 'あいうえお';\n".repeat(20_000);

            let output = run_linter(&command(&script), &text).await.unwrap();
            assert_eq!(output.len(), text.len());
        }

        #[tokio::test]
        async fn test_arguments_are_passed() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "cat > /dev/null\necho \"$@\"");

            let output = run_linter(&command(&script), "").await.unwrap();
            assert_eq!(output.trim(), "-f json --stdin --stdin-filename /project/a.js");
        }

        #[tokio::test]
        async fn test_stderr_fails_the_run() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "cat > /dev/null\necho 'boom' >&2\necho '[]'");

            let err = run_linter(&command(&script), "x").await.unwrap_err();
            match err {
                ProcessError::Stderr(message) => assert_eq!(message, "boom"),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_linter_ignoring_stdin() {
            let dir = tempfile::tempdir().unwrap();
            let script = write_script(dir.path(), "echo '[]'");
            let text = "x".repeat(1 << 20);

            let output = run_linter(&command(&script), &text).await.unwrap();
            assert_eq!(output.trim(), "[]");
        }
    }
}
