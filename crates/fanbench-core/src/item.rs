//! Indexed work items.

/// An input value tagged with its original 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem<T> {
    /// Position of the item in the caller's input sequence.
    pub index: usize,
    /// The opaque input value.
    pub value: T,
}

impl<T> WorkItem<T> {
    /// Tag every value with its position.
    #[must_use]
    pub fn enumerate(values: Vec<T>) -> Vec<WorkItem<T>> {
        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| WorkItem { index, value })
            .collect()
    }
}
