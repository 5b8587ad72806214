use std::iter::FusedIterator;

/// Forward cursor over a decoded list.
///
/// Borrows the backing list and never changes it. Any number of views can walk
/// the same list independently, and [`View::reset`] starts a view over.
#[derive(Debug)]
pub struct View<'a, T> {
    items: &'a [T],
    index: usize,
}

impl<'a, T> View<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items, index: 0 }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Number of items already returned.
    pub fn position(&self) -> usize {
        self.index
    }

    /// The whole backing list, regardless of position.
    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.items.get(index)
    }
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            index: self.index,
        }
    }
}

impl<'a, T> Iterator for View<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.items.len() - self.index;
        (left, Some(left))
    }
}

impl<T> ExactSizeIterator for View<'_, T> {}

impl<T> FusedIterator for View<'_, T> {}
