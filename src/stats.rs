//! Runtime statistics and decode observers.

use crate::coding::code::CodeParameters;
use crate::coding::table::CodeTable;

/// Receives notifications about each word a decoder processes.
///
/// Observers have no effect on decoding. Words are reported in order within each call
/// to a decoder.
pub trait DecodeObserver {
    /// Called when the word at index `block` was decoded, with the position of the
    /// corrected bit within the word, if any.
    fn on_word(&mut self, _params: CodeParameters, _block: usize, _fixed: Option<usize>) {}

    /// Called when the word at index `block` had an unrecoverable error.
    fn on_unrecoverable(&mut self, _params: CodeParameters, _block: usize) {}
}

/// Observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullObserver;

impl DecodeObserver for NullObserver {}

impl<'a, O: DecodeObserver + ?Sized> DecodeObserver for &'a mut O {
    fn on_word(&mut self, params: CodeParameters, block: usize, fixed: Option<usize>) {
        (**self).on_word(params, block, fixed)
    }

    fn on_unrecoverable(&mut self, params: CodeParameters, block: usize) {
        (**self).on_unrecoverable(params, block)
    }
}

/// Tracks stats for an error correction code.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CodeStats {
    /// Number of bits per word.
    size: usize,
    /// Total number of received words.
    words: usize,
    /// Number of corrected bits.
    fixed: usize,
    /// Number of unrecoverable words.
    err: usize,
}

impl CodeStats {
    /// Create a new `CodeStats` with empty counters for the code with the given number of
    /// bits per word.
    fn new(size: usize) -> Self {
        CodeStats {
            size: size,
            words: 0,
            err: 0,
            fixed: 0,
        }
    }

    /// Record that a word was received with the given amount of corrected bits.
    pub fn record_fixes(&mut self, err: usize) {
        debug_assert!(err <= self.size);

        self.words += 1;
        self.fixed += err;
    }

    /// Record that a word was received with an unrecoverable error.
    pub fn record_err(&mut self) {
        self.words += 1;
        self.err += 1;
    }

    /// Total number of received words.
    pub fn words(&self) -> usize { self.words }
    /// Number of corrected bits.
    pub fn fixed(&self) -> usize { self.fixed }
    /// Number of unrecoverable words.
    pub fn errors(&self) -> usize { self.err }

    /// Merge in the stats from the given object and clear the other stats.
    fn merge(&mut self, other: &mut CodeStats) {
        debug_assert!(self.size == other.size);

        self.words += other.words;
        self.err += other.err;
        self.fixed += other.fixed;

        other.clear();
    }

    /// Clear all stats.
    fn clear(&mut self) {
        self.words = 0;
        self.err = 0;
        self.fixed = 0;
    }
}

/// Records per-code runtime statistics, indexed like the code table they were created
/// for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stats {
    codes: Vec<CodeStats>,
}

impl Default for Stats {
    fn default() -> Self { Stats::for_table(CodeTable::standard()) }
}

impl Stats {
    /// Create empty stats for the codes in the given table.
    pub fn for_table(table: &CodeTable) -> Self {
        Stats {
            codes: table.iter().map(|c| CodeStats::new(c.params().n())).collect(),
        }
    }

    /// Get the stats for the code with the given index.
    pub fn code(&self, index: usize) -> Option<&CodeStats> { self.codes.get(index) }

    /// Merge in the stats from the given object and reset the other stats back to
    /// empty.
    pub fn merge<T: HasStats>(&mut self, other: &mut T) {
        let stats = other.stats();
        debug_assert!(self.codes.len() == stats.codes.len());

        for (a, b) in self.codes.iter_mut().zip(stats.codes.iter_mut()) {
            a.merge(b);
        }
    }

    /// Clear all stats.
    pub fn clear(&mut self) {
        for c in self.codes.iter_mut() {
            c.clear();
        }
    }

    /// Get the stats for the given code, if it belongs to the table these stats track.
    fn get_mut(&mut self, params: CodeParameters) -> Option<&mut CodeStats> {
        self.codes.get_mut(params.index()).filter(|s| s.size == params.n())
    }
}

impl DecodeObserver for Stats {
    fn on_word(&mut self, params: CodeParameters, _: usize, fixed: Option<usize>) {
        if let Some(s) = self.get_mut(params) {
            s.record_fixes(if fixed.is_some() { 1 } else { 0 });
        }
    }

    fn on_unrecoverable(&mut self, params: CodeParameters, _: usize) {
        if let Some(s) = self.get_mut(params) {
            s.record_err();
        }
    }
}

/// Indicates that a type captures statistics.
pub trait HasStats {
    /// Retrieve captured statistics.
    fn stats(&mut self) -> &mut Stats;
}

impl HasStats for Stats {
    fn stats(&mut self) -> &mut Stats { self }
}
