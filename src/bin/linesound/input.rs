//! Stdin line reader feeding the trigger table.

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
    thread::{self, JoinHandle},
};

use linesound::engine::Engine;

/// Read stdin line by line on a dedicated thread, echo each line to stdout
/// and fire triggers.
///
/// The echo keeps the tool usable as a tee in the middle of a pipeline.
/// End of input only ends this thread; voices already playing decay normally.
pub fn spawn(engine: Arc<Engine>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("linesound-input".into())
        .spawn(move || {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            let mut line = Vec::new();

            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = trim_line_ending(&line);
                        if let Err(err) = echo(&mut io::stdout().lock(), line) {
                            tracing::warn!("writing to stdout failed: {err}");
                        }
                        if let Err(err) = engine.trigger(line) {
                            tracing::warn!("{err}");
                        }
                    }
                    Err(err) => {
                        tracing::error!("reading input failed: {err}");
                        break;
                    }
                }
            }

            tracing::info!("input closed, no more triggers");
        })
}

/// Write `line` followed by a newline and flush, so piped output isn't held back.
fn echo(out: &mut impl Write, line: &[u8]) -> io::Result<()> {
    out.write_all(line)?;
    out.write_all(b"\n")?;
    out.flush()
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unix_and_windows_endings() {
        assert_eq!(trim_line_ending(b"hey\n"), b"hey");
        assert_eq!(trim_line_ending(b"hey\r\n"), b"hey");
        assert_eq!(trim_line_ending(b"hey"), b"hey");
        assert_eq!(trim_line_ending(b"\n"), b"");
    }

    #[test]
    fn echo_passes_raw_bytes_through() {
        let mut out = Vec::new();
        echo(&mut out, b"hey").unwrap();
        echo(&mut out, b"\xff not utf-8").unwrap();
        echo(&mut out, b"").unwrap();

        assert_eq!(out, b"hey\n\xff not utf-8\n\n");
    }
}
