use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::LaunchError;

#[derive(Debug)]
pub struct LineTap {
    pub line: String,
    pub stream: LineStream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStream {
    Stdout,
    Stderr,
}

pub fn pump_stdout<R>(rd: R, line_tx: mpsc::Sender<LineTap>) -> JoinHandle<Result<u64, LaunchError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump(rd, "stdout", line_tx, LineStream::Stdout)
}

pub fn pump_stderr<R>(rd: R, line_tx: mpsc::Sender<LineTap>) -> JoinHandle<Result<u64, LaunchError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    pump(rd, "stderr", line_tx, LineStream::Stderr)
}

/// Split `rd` into lines and send each one; returns the number of bytes read.
/// Keeps draining the reader even when the receiver is gone, so the child
/// never blocks on a full pipe.
fn pump<R>(
    mut rd: R,
    label: &'static str,
    line_tx: mpsc::Sender<LineTap>,
    stream: LineStream,
) -> JoinHandle<Result<u64, LaunchError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        let mut line_buf: Vec<u8> = Vec::with_capacity(8 * 1024);
        let mut splitter = LineSplitter::default();

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| LaunchError::StreamIo {
                stream: label,
                source: e,
            })?;
            if n == 0 {
                break;
            }
            total += n as u64;

            line_buf.extend_from_slice(&buf[..n]);
            while let Some(one) = splitter.next_line(&mut line_buf) {
                let line = String::from_utf8_lossy(&one).to_string();
                let _ = line_tx.send(LineTap { line, stream }).await;
            }
        }

        // EOF flush: deliver the last partial line if it has no terminator.
        if !line_buf.is_empty() {
            let line = String::from_utf8_lossy(&line_buf).to_string();
            let _ = line_tx.send(LineTap { line, stream }).await;
        }

        Ok(total)
    })
}

/// Ends a line at `\n`, `\r\n` or a lone `\r` (progress updates).
#[derive(Debug, Default)]
struct LineSplitter {
    /// The last line ended with a `\r` at the end of a read; a `\n` that
    /// opens the next read belongs to it.
    pending_cr: bool,
}

impl LineSplitter {
    fn next_line(&mut self, buf: &mut Vec<u8>) -> Option<Vec<u8>> {
        if self.pending_cr && !buf.is_empty() {
            self.pending_cr = false;
            if buf[0] == b'\n' {
                buf.remove(0);
            }
        }

        let pos = buf.iter().position(|&b| b == b'\n' || b == b'\r')?;
        let terminator_len = match (buf[pos], buf.get(pos + 1)) {
            (b'\r', Some(b'\n')) => 2,
            (b'\r', None) => {
                self.pending_cr = true;
                1
            }
            _ => 1,
        };

        let mut one: Vec<u8> = buf.drain(..pos + terminator_len).collect();
        one.truncate(pos);
        Some(one)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn flushes_last_line_without_newline_on_eof() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let (tx, mut rx) = mpsc::channel::<LineTap>(8);

        let task = pump_stdout(rd, tx);

        wr.write_all(b"hello").await.unwrap();
        drop(wr);

        let tap = rx.recv().await.expect("expected one line");
        assert_eq!(tap.line, "hello");
        assert_eq!(tap.stream, LineStream::Stdout);

        assert_eq!(task.await.unwrap().unwrap(), 5);
    }

    fn split_all(splitter: &mut LineSplitter, buf: &mut Vec<u8>) -> Vec<String> {
        std::iter::from_fn(|| splitter.next_line(buf))
            .map(|l| String::from_utf8_lossy(&l).to_string())
            .collect()
    }

    #[test]
    fn lone_carriage_return_ends_a_line() {
        let mut splitter = LineSplitter::default();
        let mut buf = b"1%\r50%\r100%\nrest".to_vec();
        assert_eq!(split_all(&mut splitter, &mut buf), vec!["1%", "50%", "100%"]);
        assert_eq!(buf, b"rest");
    }

    #[test]
    fn crlf_split_between_reads_is_one_line_end() {
        let mut splitter = LineSplitter::default();
        let mut buf = b"first\r".to_vec();
        assert_eq!(split_all(&mut splitter, &mut buf), vec!["first"]);

        buf.extend_from_slice(b"\nsecond\r\r");
        assert_eq!(split_all(&mut splitter, &mut buf), vec!["second", ""]);

        buf.extend_from_slice(b"\n");
        assert!(split_all(&mut splitter, &mut buf).is_empty());
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn progress_updates_arrive_before_the_newline() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let (tx, mut rx) = mpsc::channel::<LineTap>(8);

        let task = pump_stdout(rd, tx);

        wr.write_all(b"[download]   1.0%\r").await.unwrap();
        let tap = rx.recv().await.expect("update before the download ends");
        assert_eq!(tap.line, "[download]   1.0%");

        wr.write_all(b"\n").await.unwrap();
        drop(wr);
        assert!(rx.recv().await.is_none());
        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn splits_crlf_lines_across_reads() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let (tx, mut rx) = mpsc::channel::<LineTap>(8);

        let task = pump_stderr(rd, tx);

        wr.write_all(b"first\r\nsec").await.unwrap();
        wr.write_all(b"ond\n\n").await.unwrap();
        drop(wr);

        let mut lines = Vec::new();
        while let Some(tap) = rx.recv().await {
            assert_eq!(tap.stream, LineStream::Stderr);
            lines.push(tap.line);
        }
        assert_eq!(lines, vec!["first", "second", ""]);
        task.await.unwrap().unwrap();
    }
}
