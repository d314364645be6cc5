use crate::record::VariantKey;

/// A natural-order walk over a snapshot of pool keys.
///
/// Running off the end yields `None` once and rewinds, so the next call
/// starts a fresh pass without an explicit reset.
#[derive(Debug, Clone, Default)]
pub struct Traversal {
    keys: Vec<VariantKey>,
    cursor: usize,
}

impl Traversal {
    pub fn new<I: IntoIterator<Item = VariantKey>>(keys: I) -> Self {
        let mut keys: Vec<_> = keys.into_iter().collect();
        keys.sort();
        Traversal { keys, cursor: 0 }
    }

    pub fn keys(&self) -> &[VariantKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Iterator for Traversal {
    type Item = VariantKey;

    fn next(&mut self) -> Option<Self::Item> {
        match self.keys.get(self.cursor) {
            Some(key) => {
                self.cursor += 1;
                Some(key.clone())
            }
            None => {
                self.cursor = 0;
                None
            }
        }
    }
}
