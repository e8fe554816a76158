use crate::error::{FreqgenError, Result};

/// Lazy iterator over the k-length windows of a sequence.
///
/// With `overlap` the window slides by one position; without it the window
/// jumps by `k`, discarding any trailing fragment shorter than `k`. The
/// iterator borrows the sequence, so building a fresh one is free.
#[derive(Debug, Clone)]
pub struct Kmers<'a> {
    seq: &'a str,
    k: usize,
    step: usize,
    pos: usize,
}

impl<'a> Iterator for Kmers<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos + self.k > self.seq.len() {
            return None;
        }
        let kmer = &self.seq[self.pos..self.pos + self.k];
        self.pos += self.step;
        Some(kmer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.pos + self.k > self.seq.len() {
            0
        } else {
            (self.seq.len() - self.pos - self.k) / self.step + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Kmers<'_> {}

/// Windows of length `k` over `seq`. A sequence shorter than `k` yields an
/// empty iterator; `k == 0` is rejected.
pub fn kmers(seq: &str, k: usize, overlap: bool) -> Result<Kmers<'_>> {
    if k == 0 {
        return Err(FreqgenError::InvalidInput(
            "k-mer length must be at least 1".to_string(),
        ));
    }
    Ok(Kmers {
        seq,
        k,
        step: if overlap { 1 } else { k },
        pos: 0,
    })
}
