pub struct RecordChunker {
    chunk_size: usize,
}

impl RecordChunker {
    /// A zero chunk size is treated as one record per chunk.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn calculate_chunks(&self, total_records: usize) -> Vec<ChunkRange> {
        let mut chunks = Vec::new();
        let mut current_start = 0;
        let mut chunk_index = 0;

        while current_start < total_records {
            let end = (current_start + self.chunk_size).min(total_records);

            chunks.push(ChunkRange {
                index: chunk_index,
                start: current_start,
                end,
                is_first: chunk_index == 0,
                is_last: end >= total_records,
            });

            current_start = end;
            chunk_index += 1;
        }

        chunks
    }

    pub fn split<'a, T>(&self, items: &'a [T]) -> impl Iterator<Item = (ChunkRange, &'a [T])> + 'a {
        self.calculate_chunks(items.len())
            .into_iter()
            .map(move |range| {
                let slice = &items[range.start..range.end];
                (range, slice)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRange {
    pub index: usize,
    pub start: usize,
    pub end: usize,
    pub is_first: bool,
    pub is_last: bool,
}

impl ChunkRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
