/// Anything that can enumerate fixed-length value assignments
pub trait PermutationSource<T> {
    /// Length of every produced permutation
    fn result_length(&self) -> usize;

    /// All permutations, in a stable order
    fn permutations(&self) -> Box<dyn Iterator<Item = Vec<T>> + '_>;
}

/// Cartesian product over per-slot option lists.
///
/// The first slot varies fastest. With no slots the product holds exactly one empty
/// permutation; an empty slot makes the product empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationSlotMachine<T> {
    slots: Vec<Vec<T>>,
}

impl<T: Clone> PermutationSlotMachine<T> {
    pub fn new(slots: Vec<Vec<T>>) -> Self {
        Self { slots }
    }

    /// Same option list for every one of `length` slots
    pub fn uniform(options: &[T], length: usize) -> Self {
        Self::new(vec![options.to_vec(); length])
    }

    pub fn slots(&self) -> &[Vec<T>] {
        &self.slots
    }

    /// Number of permutations the machine produces
    pub fn permutation_count(&self) -> usize {
        self.slots.iter().map(Vec::len).product()
    }

    /// Permutations in which no two slots sit at the same option index
    pub fn unique_slot_permutations(&self) -> impl Iterator<Item = Vec<T>> + '_ {
        SlotIndexIterator::new(&self.slots).filter_map(move |indices| {
            let distinct = indices
                .iter()
                .enumerate()
                .all(|(i, index)| !indices[i + 1..].contains(index));
            distinct.then(|| self.values_at(&indices))
        })
    }

    fn values_at(&self, indices: &[usize]) -> Vec<T> {
        indices
            .iter()
            .zip(self.slots.iter())
            .map(|(&index, options)| options[index].clone())
            .collect()
    }
}

impl<T: Clone> PermutationSource<T> for PermutationSlotMachine<T> {
    fn result_length(&self) -> usize {
        self.slots.len()
    }

    fn permutations(&self) -> Box<dyn Iterator<Item = Vec<T>> + '_> {
        Box::new(SlotIndexIterator::new(&self.slots).map(move |indices| self.values_at(&indices)))
    }
}

/// Odometer over the option indices of every slot
struct SlotIndexIterator<'a, T> {
    slots: &'a [Vec<T>],
    current: Option<Vec<usize>>,
}

impl<'a, T> SlotIndexIterator<'a, T> {
    fn new(slots: &'a [Vec<T>]) -> Self {
        let current = if slots.iter().any(Vec::is_empty) {
            None
        } else {
            Some(vec![0; slots.len()])
        };
        Self { slots, current }
    }
}

impl<T> Iterator for SlotIndexIterator<'_, T> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current.take()?;

        let mut next = result.clone();
        for (i, options) in self.slots.iter().enumerate() {
            next[i] += 1;
            if next[i] < options.len() {
                self.current = Some(next);
                return Some(result);
            }
            next[i] = 0;
        }
        // Every slot rolled over
        Some(result)
    }
}
