//! Site symmetry of an origin point and symmetry reduction of a point sequence around it.
//!
//! [`PointOperationGroup::build`] runs five named stages on a full operation set `G`:
//!
//! 1. [`find_local_operations`]: the stabilizer of the origin, shifted so each operation
//!    maps the untrimmed origin exactly onto itself
//! 2. [`reduce_order_preserving`]: one operation per distinct ordered image of the sequence
//! 3. [`reduce_order_ignoring`]: further collapse images that are equal as point multisets
//! 4. [`find_self_projections`]: stabilizer operations mapping the sequence onto itself
//! 5. [`find_projection_orders`]: the distinct index permutations those operations induce
//!
//! The result is read-only and owns all of its data, so independent requests can be
//! evaluated on separate threads (see [`build_point_operation_groups`]).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Error};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::permutations::PermutationSource;
use super::symmetry_operations::SymmetryOperation;
use crate::interfaces::{Fractional3D, NumericComparer};

/// One (origin, point sequence) request for [`build_point_operation_groups`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitRequest {
    pub origin: Fractional3D,
    pub sequence: Vec<Fractional3D>,
}

impl OrbitRequest {
    pub fn new(origin: Fractional3D, sequence: Vec<Fractional3D>) -> Self {
        Self { origin, sequence }
    }
}

/// Symmetry information of a point sequence around an origin site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOperationGroup {
    origin_point: Fractional3D,
    point_sequence: Vec<Fractional3D>,
    group_size: usize,
    local_sequence_operations: Vec<SymmetryOperation>,
    order_preserving_unique_sequence_operations: Vec<SymmetryOperation>,
    order_ignoring_unique_sequence_operations: Vec<SymmetryOperation>,
    order_ignoring_self_projection_operations: Vec<SymmetryOperation>,
    self_projection_orders: Vec<Vec<usize>>,
    unique_origin_site_count: usize,
}

impl PointOperationGroup {
    /// Evaluate the full operation set `operations` for `origin` and `sequence`.
    ///
    /// Fails for a malformed operation set (empty, no operation fixing the origin, or a
    /// group size not divisible by the stabilizer size) and when `cancel` is raised.
    pub fn build(
        operations: &[SymmetryOperation],
        origin: Fractional3D,
        sequence: Vec<Fractional3D>,
        comparer: &NumericComparer,
        cancel: Option<&AtomicBool>,
    ) -> Result<Self, Error> {
        if operations.is_empty() {
            bail!("Operation set is empty");
        }

        let local_sequence_operations = find_local_operations(operations, &origin, comparer);
        if local_sequence_operations.is_empty() {
            bail!("No operation of the set maps the origin {:?} onto itself", origin);
        }
        if operations.len() % local_sequence_operations.len() != 0 {
            bail!(
                "Malformed operation set: {} operations, stabilizer of size {}",
                operations.len(),
                local_sequence_operations.len()
            );
        }
        check_cancelled(cancel)?;

        let order_preserving = reduce_order_preserving(&local_sequence_operations, &sequence, comparer);
        check_cancelled(cancel)?;
        let order_ignoring = reduce_order_ignoring(&order_preserving, &sequence, comparer);
        let self_projections = find_self_projections(&local_sequence_operations, &sequence, comparer);
        let self_projection_orders = find_projection_orders(&self_projections, &sequence, comparer, cancel)?;

        let group = Self {
            origin_point: origin,
            point_sequence: sequence,
            group_size: operations.len(),
            unique_origin_site_count: operations.len() / local_sequence_operations.len(),
            local_sequence_operations,
            order_preserving_unique_sequence_operations: order_preserving,
            order_ignoring_unique_sequence_operations: order_ignoring,
            order_ignoring_self_projection_operations: self_projections,
            self_projection_orders,
        };
        debug!(
            "Point operation group at {:?}: stabilizer {}, orbit {}, {} ordered / {} unordered unique sequences, {} projection orders",
            group.origin_point,
            group.local_sequence_operations.len(),
            group.unique_origin_site_count,
            group.order_preserving_unique_sequence_operations.len(),
            group.order_ignoring_unique_sequence_operations.len(),
            group.self_projection_orders.len()
        );
        Ok(group)
    }

    pub fn origin_point(&self) -> &Fractional3D {
        &self.origin_point
    }

    pub fn point_sequence(&self) -> &[Fractional3D] {
        &self.point_sequence
    }

    /// Size of the full operation set the group was built from
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Stabilizer of the origin point
    pub fn local_sequence_operations(&self) -> &[SymmetryOperation] {
        &self.local_sequence_operations
    }

    pub fn order_preserving_unique_sequence_operations(&self) -> &[SymmetryOperation] {
        &self.order_preserving_unique_sequence_operations
    }

    pub fn order_ignoring_unique_sequence_operations(&self) -> &[SymmetryOperation] {
        &self.order_ignoring_unique_sequence_operations
    }

    pub fn order_ignoring_self_projection_operations(&self) -> &[SymmetryOperation] {
        &self.order_ignoring_self_projection_operations
    }

    /// Distinct index permutations π with `op(sequence)[i] == sequence[π(i)]`
    pub fn self_projection_orders(&self) -> &[Vec<usize>] {
        &self.self_projection_orders
    }

    /// Orbit size of the origin point
    pub fn unique_origin_site_count(&self) -> usize {
        self.unique_origin_site_count
    }

    pub fn order_preserving_extension_count_per_site(&self) -> usize {
        self.order_preserving_unique_sequence_operations.len()
    }

    pub fn order_ignoring_extension_count_per_site(&self) -> usize {
        self.order_ignoring_unique_sequence_operations.len()
    }

    /// Every stabilizer operation maps the sequence onto itself
    pub fn is_full_self_projection(&self) -> bool {
        self.local_sequence_operations.len() == self.order_ignoring_self_projection_operations.len()
    }

    pub fn has_permutation_multiplicity(&self) -> bool {
        self.self_projection_orders.len() != 1
    }

    /// Images of the sequence under the order preserving representatives
    pub fn unique_sequences_with_preserved_order(&self) -> Vec<Vec<Fractional3D>> {
        self.images(&self.order_preserving_unique_sequence_operations)
    }

    /// Images of the sequence under the order ignoring representatives
    pub fn unique_sequences_without_preserved_order(&self) -> Vec<Vec<Fractional3D>> {
        self.images(&self.order_ignoring_unique_sequence_operations)
    }

    fn images(&self, operations: &[SymmetryOperation]) -> Vec<Vec<Fractional3D>> {
        operations
            .iter()
            .map(|operation| operation.transform(&self.point_sequence).collect())
            .collect()
    }

    /// Check `lhs[i] == rhs[π(i)]` for some self projection order π.
    ///
    /// Inputs whose length differs from the point sequence are never equivalent.
    pub fn is_equivalent_permutation<T, E>(&self, lhs: &[T], rhs: &[T], eq: &E) -> bool
    where
        E: Fn(&T, &T) -> bool,
    {
        let length = self.point_sequence.len();
        lhs.len() == length
            && rhs.len() == length
            && self
                .self_projection_orders
                .iter()
                .any(|order| order.iter().enumerate().all(|(i, &j)| eq(&lhs[i], &rhs[j])))
    }

    /// Filter label permutations of the sequence down to one per equivalence class.
    ///
    /// Two permutations are equivalent if a self projection order maps one onto the other.
    /// Candidates are bucketed by the wrapping sum of `selector` over their values, so the
    /// bucket key does not depend on the value order. Callers should supply a selector that
    /// spreads well; a poor one only costs speed.
    ///
    /// Without permutation multiplicity the source output is returned unchanged.
    pub fn unique_permutations<T, S, E, H>(
        &self,
        source: &S,
        eq: E,
        selector: H,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<Vec<T>>, Error>
    where
        S: PermutationSource<T> + ?Sized,
        E: Fn(&T, &T) -> bool,
        H: Fn(&T) -> u64,
    {
        if source.result_length() != self.point_sequence.len() {
            bail!(
                "Permutation source length {} does not match the point sequence length {}",
                source.result_length(),
                self.point_sequence.len()
            );
        }

        if !self.has_permutation_multiplicity() {
            return Ok(source.permutations().collect());
        }

        let mut unique: Vec<Vec<T>> = Vec::new();
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        for candidate in source.permutations() {
            check_cancelled(cancel)?;

            let key = candidate.iter().fold(0u64, |sum, value| sum.wrapping_add(selector(value)));
            let bucket = buckets.entry(key).or_default();
            if bucket
                .iter()
                .any(|&index| self.is_equivalent_permutation(&candidate, &unique[index], &eq))
            {
                continue;
            }
            bucket.push(unique.len());
            unique.push(candidate);
        }
        trace!("{} unique permutations remain", unique.len());
        Ok(unique)
    }
}

/// Stabilizer of `origin` within `operations`.
///
/// An operation belongs to it if its image of the origin equals the origin up to a lattice
/// translation. It is returned shifted by `origin - image` so that it fixes the untrimmed
/// origin exactly.
pub fn find_local_operations(
    operations: &[SymmetryOperation],
    origin: &Fractional3D,
    comparer: &NumericComparer,
) -> Vec<SymmetryOperation> {
    operations
        .iter()
        .filter_map(|operation| {
            let untrimmed = operation.apply(*origin);
            equal_modulo_lattice(&untrimmed, origin, comparer).then(|| operation.with_shift(&(origin - untrimmed)))
        })
        .collect()
}

/// Equality up to a lattice translation, with the tolerance applied across cell edges
fn equal_modulo_lattice(lhs: &Fractional3D, rhs: &Fractional3D, comparer: &NumericComparer) -> bool {
    (lhs - rhs).iter().all(|difference| {
        let offset = difference.rem_euclid(1.0);
        comparer.is_zero(offset) || comparer.equals(offset, 1.0)
    })
}

/// Keep the first operation for every distinct ordered image of `sequence`
pub fn reduce_order_preserving(
    operations: &[SymmetryOperation],
    sequence: &[Fractional3D],
    comparer: &NumericComparer,
) -> Vec<SymmetryOperation> {
    reduce_by(operations, sequence, |lhs, rhs| sequences_equal(lhs, rhs, comparer))
}

/// Keep the first operation for every distinct image of `sequence` as a multiset
pub fn reduce_order_ignoring(
    operations: &[SymmetryOperation],
    sequence: &[Fractional3D],
    comparer: &NumericComparer,
) -> Vec<SymmetryOperation> {
    reduce_by(operations, sequence, |lhs, rhs| multisets_equal(lhs, rhs, comparer))
}

/// Operations whose image of `sequence` is the same point multiset
pub fn find_self_projections(
    operations: &[SymmetryOperation],
    sequence: &[Fractional3D],
    comparer: &NumericComparer,
) -> Vec<SymmetryOperation> {
    operations
        .iter()
        .filter(|operation| {
            let image: Vec<Fractional3D> = operation.transform(sequence).collect();
            multisets_equal(&image, sequence, comparer)
        })
        .cloned()
        .collect()
}

/// Distinct index permutations induced by self projecting operations, in first-seen order.
///
/// Operations that do not self project are skipped.
pub fn find_projection_orders(
    self_projections: &[SymmetryOperation],
    sequence: &[Fractional3D],
    comparer: &NumericComparer,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<Vec<usize>>, Error> {
    let mut orders: Vec<Vec<usize>> = Vec::new();
    for operation in self_projections {
        check_cancelled(cancel)?;
        let image: Vec<Fractional3D> = operation.transform(sequence).collect();
        if let Some(order) = projection_order(&image, sequence, comparer) {
            if !orders.contains(&order) {
                orders.push(order);
            }
        }
    }
    Ok(orders)
}

fn reduce_by<F>(operations: &[SymmetryOperation], sequence: &[Fractional3D], same: F) -> Vec<SymmetryOperation>
where
    F: Fn(&[Fractional3D], &[Fractional3D]) -> bool,
{
    let mut kept: Vec<(SymmetryOperation, Vec<Fractional3D>)> = Vec::new();
    for operation in operations {
        let image: Vec<Fractional3D> = operation.transform(sequence).collect();
        if kept.iter().any(|(_, other)| same(&image, other)) {
            continue;
        }
        kept.push((operation.clone(), image));
    }
    kept.into_iter().map(|(operation, _)| operation).collect()
}

fn sequences_equal(lhs: &[Fractional3D], rhs: &[Fractional3D], comparer: &NumericComparer) -> bool {
    lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| comparer.vectors_equal(a, b))
}

fn multisets_equal(lhs: &[Fractional3D], rhs: &[Fractional3D], comparer: &NumericComparer) -> bool {
    lhs.len() == rhs.len() && projection_order(lhs, rhs, comparer).is_some()
}

/// π with `image[i] == reference[π(i)]`, each reference index used once
fn projection_order(image: &[Fractional3D], reference: &[Fractional3D], comparer: &NumericComparer) -> Option<Vec<usize>> {
    let mut used = vec![false; reference.len()];
    let mut order = Vec::with_capacity(image.len());
    for point in image {
        let index = (0..reference.len()).find(|&j| !used[j] && comparer.vectors_equal(point, &reference[j]))?;
        used[index] = true;
        order.push(index);
    }
    Some(order)
}

fn check_cancelled(cancel: Option<&AtomicBool>) -> Result<(), Error> {
    match cancel {
        Some(flag) if flag.load(Ordering::Relaxed) => bail!("Point operation group computation was cancelled"),
        _ => Ok(()),
    }
}

/// Evaluate many requests against one operation set.
///
/// Runs on the rayon pool with the `parallel` feature, sequentially otherwise. Results keep
/// the request order.
pub fn build_point_operation_groups(
    operations: &[SymmetryOperation],
    requests: &[OrbitRequest],
    comparer: &NumericComparer,
    cancel: Option<&AtomicBool>,
) -> Vec<Result<PointOperationGroup, Error>> {
    let evaluate = |request: &OrbitRequest| {
        PointOperationGroup::build(operations, request.origin, request.sequence.clone(), comparer, cancel)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        requests.par_iter().map(evaluate).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(evaluate).collect()
    }
}
