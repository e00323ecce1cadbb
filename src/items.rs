use crate::utils::move_item;

/// Ordered sequence of dock items. Display order is insertion order and an item is identified by
/// its position, so duplicate values are fine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemList<T> {
    items: Vec<T>,
}

impl<T> ItemList<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Moves the item at `from` so that it ends up at `to`. The remove and the insert happen in
    /// the same call, nothing can observe the list with the item missing.
    ///
    /// # Panics
    /// Panics if `from` or `to` is out of bounds.
    pub fn reorder(&mut self, from: usize, to: usize) {
        move_item(from, to, &mut self.items);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> FromIterator<T> for ItemList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a ItemList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
