//! `io::Read` adapter that hands out input in a fixed rotation of chunk sizes.

use std::io::{self, Read};

pub struct ChunkedReader<'a> {
    bytes: &'a [u8],
    sizes: Vec<usize>,
    next_size: usize,
    reads: usize,
}

impl<'a> ChunkedReader<'a> {
    /// Each `read` returns at most the next size from `sizes`, cycling.
    pub fn new(bytes: &'a [u8], sizes: &[usize]) -> Self {
        assert!(
            !sizes.is_empty() && sizes.iter().all(|&size| size > 0),
            "chunk sizes must be non-empty and positive"
        );
        Self {
            bytes,
            sizes: sizes.to_vec(),
            next_size: 0,
            reads: 0,
        }
    }

    /// Number of non-empty reads served so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn label(&self) -> String {
        let sizes: Vec<String> = self.sizes.iter().map(usize::to_string).collect();
        format!("chunks[{}]", sizes.join(","))
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.bytes.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        let size = self.sizes[self.next_size % self.sizes.len()];
        self.next_size += 1;
        let n = size.min(buf.len()).min(self.bytes.len());
        let (head, tail) = self.bytes.split_at(n);
        buf[..n].copy_from_slice(head);
        self.bytes = tail;
        self.reads += 1;
        Ok(n)
    }
}
