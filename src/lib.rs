pub mod batch;
pub mod cam;
pub mod error;
pub mod lzss;
pub mod plt;
pub mod uni;
pub mod utils;

pub use error::{ArchiveError, DecodeError};
use lzss::RefPolicy;

/// The default upper bound on the decompressed size a payload may request.
pub const DEFAULT_MAX_OUTPUT: usize = 64 << 20;

/// Stores information about the environment.
#[derive(Copy, Clone, Debug)]
pub struct Context {
    /// The largest decompressed size that a payload header may request.
    max_output: usize,
    /// Specifies how back-references to unwritten window slots are handled.
    policy: RefPolicy,
}

impl Context {
    pub fn new(max_output: usize, policy: RefPolicy) -> Self {
        Self { max_output, policy }
    }

    pub fn max_output(&self) -> usize {
        self.max_output
    }

    pub fn policy(&self) -> RefPolicy {
        self.policy
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT, RefPolicy::Strict)
    }
}

/// A trait that defines the interface for decoding buffers.
pub trait Decoder<'a> {
    /// Creates a new Decoder that reads from 'input' and appends exactly
    /// 'target_len' bytes to 'output'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>, target_len: usize) -> Self;

    /// Try to decode the buffer 'input', and return the number of input bytes
    /// that were consumed followed by the number of bytes written. On error
    /// nothing is appended to the output.
    #[must_use]
    fn decode(&mut self) -> Result<(usize, usize), DecodeError>;
}
