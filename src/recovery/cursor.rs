use crate::flatten::FlatEntry;

#[derive(Debug)]
pub struct Cursor<'a> {
    entries: &'a [FlatEntry],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(entries: &'a [FlatEntry]) -> Self {
        Self {
            entries,
            position: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a FlatEntry> {
        self.entries.get(self.position)
    }

    pub fn peek_nth(&self, n: usize) -> Option<&'a FlatEntry> {
        self.entries.get(self.position + n)
    }

    pub fn bump(&mut self) {
        self.position += 1;
    }

    pub fn next_if(&mut self, p: impl FnOnce(&FlatEntry) -> bool) -> Option<&'a FlatEntry> {
        let current = self.peek().filter(|&x| p(x));
        if current.is_some() {
            self.position += 1;
        }
        current
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a FlatEntry> {
        let next = self.peek();
        if next.is_some() {
            self.position += 1;
        }
        next
    }
}
