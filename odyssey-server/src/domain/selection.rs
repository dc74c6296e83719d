//! Selection type.
//!
//! A `Selection` pairs with a [`Path`](super::Path): one slot per leg, each
//! holding the offer chosen for that leg or nothing. Selections are
//! transient values owned by whoever is driving a search or an interactive
//! pick-and-remove flow; they are never persisted.

use super::Offer;

/// A per-leg choice of offer (or none) for one path.
///
/// Slot mutators are deliberately forgiving: out-of-range indices are
/// ignored rather than panicking, because they arise routinely from
/// interactive callers working against stale state.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::{Offer, Selection, parse_instant};
///
/// let offer = Offer::new(
///     "o1",
///     "Spacegenix",
///     100.0,
///     parse_instant("2024-03-15T08:00:00Z").unwrap(),
///     parse_instant("2024-03-15T12:00:00Z").unwrap(),
/// );
///
/// let mut selection = Selection::empty(3);
/// assert!(!selection.is_complete());
///
/// selection.set(1, offer);
/// assert_eq!(selection.chosen_count(), 1);
/// assert!(selection.is_complete()); // one chosen slot, no internal gap
///
/// selection.clear(1);
/// assert_eq!(selection.chosen_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    slots: Vec<Option<Offer>>,
}

impl Selection {
    /// Create a selection with `len` unset slots.
    pub fn empty(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Create a selection from explicit slots.
    pub fn from_slots(slots: Vec<Option<Offer>>) -> Self {
        Self { slots }
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns all slots in leg order.
    pub fn slots(&self) -> &[Option<Offer>] {
        &self.slots
    }

    /// Returns the offer at `index`, if the slot exists and is set.
    pub fn slot(&self, index: usize) -> Option<&Offer> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Set the offer at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, offer: Offer) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(offer);
        }
    }

    /// Clear the slot at `index`. Out-of-range indices are ignored.
    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Iterate over the set slots as (index, offer) pairs.
    pub fn chosen(&self) -> impl Iterator<Item = (usize, &Offer)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|o| (i, o)))
    }

    /// Number of set slots.
    pub fn chosen_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Index of the first set slot.
    pub fn first_chosen(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_some())
    }

    /// Index of the last set slot.
    pub fn last_chosen(&self) -> Option<usize> {
        self.slots.iter().rposition(|s| s.is_some())
    }

    /// True when at least one slot is set and no unset slot lies between
    /// the first and last set slots.
    ///
    /// "Complete" means contiguous, not full: unset slots before the first
    /// or after the last chosen offer do not count against completeness.
    /// Callers wanting every slot filled compare [`Selection::chosen_count`]
    /// with [`Selection::len`].
    pub fn is_complete(&self) -> bool {
        let (Some(first), Some(last)) = (self.first_chosen(), self.last_chosen()) else {
            return false;
        };
        self.slots[first..=last].iter().all(|s| s.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parse_instant;

    fn offer(id: &str) -> Offer {
        Offer::new(
            id,
            "Spacegenix",
            100.0,
            parse_instant("2024-03-15T08:00:00Z").unwrap(),
            parse_instant("2024-03-15T12:00:00Z").unwrap(),
        )
    }

    #[test]
    fn empty_has_unset_slots() {
        let s = Selection::empty(3);
        assert_eq!(s.len(), 3);
        assert_eq!(s.chosen_count(), 0);
        assert!(s.slot(0).is_none());
    }

    #[test]
    fn set_and_clear() {
        let mut s = Selection::empty(2);
        s.set(1, offer("o1"));
        assert_eq!(s.slot(1).unwrap().id, "o1");

        s.clear(1);
        assert!(s.slot(1).is_none());
    }

    #[test]
    fn out_of_range_mutation_is_ignored() {
        let mut s = Selection::empty(2);
        s.set(5, offer("o1"));
        s.clear(5);
        assert_eq!(s.chosen_count(), 0);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn first_and_last_chosen() {
        let mut s = Selection::empty(4);
        assert_eq!(s.first_chosen(), None);
        assert_eq!(s.last_chosen(), None);

        s.set(1, offer("o1"));
        s.set(3, offer("o2"));
        assert_eq!(s.first_chosen(), Some(1));
        assert_eq!(s.last_chosen(), Some(3));
    }

    #[test]
    fn chosen_yields_indices_in_order() {
        let mut s = Selection::empty(3);
        s.set(2, offer("o2"));
        s.set(0, offer("o0"));

        let picked: Vec<(usize, &str)> = s.chosen().map(|(i, o)| (i, o.id.as_str())).collect();
        assert_eq!(picked, vec![(0, "o0"), (2, "o2")]);
    }

    #[test]
    fn complete_zero_slots_is_false() {
        assert!(!Selection::empty(0).is_complete());
    }

    #[test]
    fn complete_all_unset_is_false() {
        assert!(!Selection::empty(3).is_complete());
    }

    #[test]
    fn complete_single_chosen_is_true() {
        let mut s = Selection::empty(3);
        s.set(1, offer("o1"));
        assert!(s.is_complete());
    }

    #[test]
    fn complete_contiguous_run_is_true() {
        let mut s = Selection::empty(4);
        s.set(1, offer("o1"));
        s.set(2, offer("o2"));
        assert!(s.is_complete());
    }

    #[test]
    fn complete_internal_gap_is_false() {
        let mut s = Selection::empty(3);
        s.set(0, offer("o0"));
        s.set(2, offer("o2"));
        assert!(!s.is_complete());
    }

    #[test]
    fn complete_leading_and_trailing_unset_allowed() {
        let mut s = Selection::empty(5);
        s.set(1, offer("o1"));
        s.set(2, offer("o2"));
        s.set(3, offer("o3"));
        assert!(s.is_complete());
        assert!(s.chosen_count() < s.len());
    }
}
