/// Buffer size a reader starts out with.
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Largest buffer a reader will grow to before giving up on a request.
pub const DEFAULT_MAX_BUFFER: usize = 1024 * 1024;

/// Settings for [`read_request_with`](crate::read_request_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadConfig {
    initial_capacity: usize,
    max_buffer: usize,
}

impl ReadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting size of the read buffer. It doubles whenever it fills up.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity.max(1);
        self
    }

    /// Upper bound for the read buffer.
    pub fn with_max_buffer(mut self, max: usize) -> Self {
        self.max_buffer = max.max(1);
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_buffer(&self) -> usize {
        self.max_buffer
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        ReadConfig {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_buffer: DEFAULT_MAX_BUFFER,
        }
    }
}
