pub mod op;

/// Number of one-word cells in the target machine's memory. Code and data
/// share them.
pub const MEM_WORDS: usize = 16;
