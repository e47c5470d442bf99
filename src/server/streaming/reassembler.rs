/// What happens to a final line that never received its `\n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TailPolicy {
    #[default]
    Drop,
    Flush,
}

impl TailPolicy {
    pub fn from_flush_flag(flush: bool) -> Self {
        if flush { TailPolicy::Flush } else { TailPolicy::Drop }
    }
}

/// Turns arbitrarily fragmented upstream bytes into complete `\n`-terminated lines.
///
/// Holds two pieces of state across chunks: the undecoded tail of a multi-byte
/// UTF-8 sequence, and the decoded text after the last newline seen so far.
#[derive(Debug, Default)]
pub struct LineReassembler {
    pending: Vec<u8>,
    buffer: String,
    tail: TailPolicy,
}

impl LineReassembler {
    pub fn new(tail: TailPolicy) -> Self {
        Self {
            tail,
            ..Default::default()
        }
    }

    /// Feeds one chunk and returns every line it completed, without the `\n`.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk);

        let Some(last) = self.buffer.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(last + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);
        complete[..last].split('\n').map(str::to_string).collect()
    }

    /// Ends the stream. Returns the unterminated tail only under [`TailPolicy::Flush`].
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            self.buffer.push(char::REPLACEMENT_CHARACTER);
            self.pending.clear();
        }
        let tail = std::mem::take(&mut self.buffer);
        if tail.is_empty() {
            return None;
        }
        match self.tail {
            TailPolicy::Flush => Some(tail),
            TailPolicy::Drop => {
                tracing::debug!(bytes = tail.len(), "dropping unterminated trailing line");
                None
            }
        }
    }

    fn decode(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        let bytes = std::mem::take(&mut self.pending);
        let mut input = bytes.as_slice();

        loop {
            match std::str::from_utf8(input) {
                Ok(s) => {
                    self.buffer.push_str(s);
                    return;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&input[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            input = &input[valid + len..];
                        }
                        // incomplete sequence at the end: wait for the next chunk
                        None => {
                            self.pending = input[valid..].to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }
}
