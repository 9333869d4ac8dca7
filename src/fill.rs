use std::io;

use crate::config::ReadConfig;
use crate::Error;

/// Read buffer with a single owner.
///
/// `buffer[start..end]` is input read but not yet consumed. Room is made at
/// the back by first moving that region to the front, and then by doubling.
pub(crate) struct FillBuffer<Read> {
    buffer: Vec<u8>,
    start: usize,
    end: usize,
    max: usize,
    reader: Option<Read>,
}

impl<Read: io::Read> FillBuffer<Read> {
    pub fn new(reader: Read, config: &ReadConfig) -> Self {
        let capacity = config.initial_capacity().min(config.max_buffer());
        Self {
            buffer: vec![0; capacity],
            start: 0,
            end: 0,
            max: config.max_buffer(),
            reader: Some(reader),
        }
    }

    /// Do one read into the free part of the buffer. 0 means end of stream.
    pub fn fill_more(&mut self) -> Result<usize, Error> {
        let Some(reader) = &mut self.reader else {
            return Ok(0);
        };

        if self.end == self.buffer.len() {
            if self.start > 0 {
                self.buffer.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }

            if self.end == self.buffer.len() {
                let len = self.buffer.len();
                if len >= self.max {
                    return Err(Error::RequestTooLarge(self.max));
                }
                let new_len = (len * 2).min(self.max);
                trace!("Grow buffer {} -> {}", len, new_len);
                self.buffer.resize(new_len, 0);
            }
        }

        let n = loop {
            match reader.read(&mut self.buffer[self.end..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        self.end += n;

        if n == 0 {
            // Free readers as soon as possible.
            self.reader = None;
        }

        Ok(n)
    }

    /// Input read but not consumed.
    pub fn window(&self) -> &[u8] {
        &self.buffer[self.start..self.end]
    }

    pub fn consume(&mut self, amount: usize) {
        let amount = amount.min(self.end - self.start);
        self.start += amount;

        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
