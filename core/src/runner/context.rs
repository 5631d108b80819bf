/// State of one supervised run, owned by its supervising task.
///
/// Once the latch trips, stdout lines keep accumulating in the transcript but
/// are no longer delivered as events.
#[derive(Debug, Default)]
pub struct InvocationContext {
    transcript: String,
    latched: bool,
    stdout_lines: u64,
    stderr_lines: u64,
    delivered_lines: u64,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stdout line. Returns the line to deliver, or `None` when it
    /// is empty or the latch has tripped.
    pub fn record_stdout(&mut self, line: String) -> Option<String> {
        if line.is_empty() {
            return None;
        }
        self.stdout_lines += 1;
        self.transcript.push_str(&line);
        self.transcript.push('\n');

        if self.latched {
            return None;
        }
        self.delivered_lines += 1;
        Some(line)
    }

    pub fn record_stderr(&mut self) {
        self.stderr_lines += 1;
    }

    pub fn trip_latch(&mut self) {
        self.latched = true;
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn stdout_lines(&self) -> u64 {
        self.stdout_lines
    }

    pub fn stderr_lines(&self) -> u64 {
        self.stderr_lines
    }

    pub fn delivered_lines(&self) -> u64 {
        self.delivered_lines
    }

    /// Take the transcript with exactly one trailing newline stripped.
    pub fn take_transcript(&mut self) -> String {
        let mut transcript = std::mem::take(&mut self.transcript);
        if transcript.ends_with('\n') {
            transcript.pop();
        }
        transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_stops_delivery_but_not_capture() {
        let mut ctx = InvocationContext::new();
        assert_eq!(ctx.record_stdout("a".into()), Some("a".into()));
        ctx.trip_latch();
        assert_eq!(ctx.record_stdout("b".into()), None);
        assert_eq!(ctx.record_stdout("c".into()), None);

        assert!(ctx.is_latched());
        assert_eq!(ctx.delivered_lines(), 1);
        assert_eq!(ctx.stdout_lines(), 3);
        assert_eq!(ctx.take_transcript(), "a\nb\nc");
    }

    #[test]
    fn empty_lines_are_ignored() {
        let mut ctx = InvocationContext::new();
        assert_eq!(ctx.record_stdout(String::new()), None);
        assert_eq!(ctx.stdout_lines(), 0);
        assert_eq!(ctx.take_transcript(), "");
    }
}
