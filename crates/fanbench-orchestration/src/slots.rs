//! Pre-sized, index-addressed result container.

use fanbench_core::job::JobError;

use crate::error::FanOutError;

/// One slot per work item, sized before dispatch.
///
/// Each slot has exactly one writer: the unit that owns its index. Results
/// are therefore placed by original position, never in completion order.
#[derive(Debug)]
pub struct ResultSlots<T> {
    slots: Vec<Option<T>>,
}

impl<T> ResultSlots<T> {
    /// Create `len` empty slots.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Write the value of slot `index`.
    pub fn fill(&mut self, index: usize, value: T) {
        debug_assert!(self.slots[index].is_none(), "slot {index} written twice");
        self.slots[index] = Some(value);
    }

    /// Borrow every slot mutably, so each can be handed to its own unit.
    pub fn as_mut_slice(&mut self) -> &mut [Option<T>] {
        &mut self.slots
    }

    /// Consume the slots in index order, failing on the first empty one.
    pub fn into_ordered(self) -> Result<Vec<T>, FanOutError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(FanOutError::Unfilled { index }))
            .collect()
    }
}

impl<T> ResultSlots<Result<T, JobError>> {
    /// Consume slots holding job outcomes, surfacing the lowest-index
    /// failure, whether a job error or an empty slot.
    pub fn into_outcomes(self) -> Result<Vec<T>, FanOutError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(Ok(value)) => Ok(value),
                Some(Err(source)) => Err(FanOutError::Job { index, source }),
                None => Err(FanOutError::Unfilled { index }),
            })
            .collect()
    }
}
