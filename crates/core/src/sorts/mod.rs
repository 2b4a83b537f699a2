use crate::array::{InstrumentedArray, RenderHook};
use crate::Result;

/// Digit width for the LSD radix sort variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadixBase {
    Four,
    Eight,
    Sixteen,
}

impl RadixBase {
    pub fn base(self) -> u32 {
        match self {
            RadixBase::Four => 4,
            RadixBase::Eight => 8,
            RadixBase::Sixteen => 16,
        }
    }

    fn digit_bits(self) -> u32 {
        match self {
            RadixBase::Four => 2,
            RadixBase::Eight => 3,
            RadixBase::Sixteen => 4,
        }
    }
}

/// The closed set of algorithms the visualiser can animate.
///
/// Every variant runs purely in terms of the instrumented primitives; none
/// touches the backing storage directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Insertion,
    Quick,
    Merge,
    Radix(RadixBase),
    Bogo,
}

impl Algorithm {
    /// Display name shown on the HUD.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insert Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Radix(RadixBase::Four) => "Radix Sort (LSD, base-4)",
            Algorithm::Radix(RadixBase::Eight) => "Radix Sort (LSD, base-8)",
            Algorithm::Radix(RadixBase::Sixteen) => "Radix Sort (LSD, base-16)",
            Algorithm::Bogo => "Bogo Sort",
        }
    }

    /// Runs the algorithm to completion. Only [`Algorithm::Bogo`] draws from
    /// the RNG (for its reshuffles).
    pub fn run<H: RenderHook>(
        self,
        array: &mut InstrumentedArray<H>,
        rng: &mut fastrand::Rng,
    ) -> Result<()> {
        match self {
            Algorithm::Bubble => bubble_sort(array),
            Algorithm::Insertion => insertion_sort(array),
            Algorithm::Quick => quick_sort(array),
            Algorithm::Merge => merge_sort(array),
            Algorithm::Radix(base) => radix_sort(array, base),
            Algorithm::Bogo => bogo_sort(array, rng),
        }
    }
}

/// Number of scatter passes needed to cover every value a `len`-element
/// permutation can hold, at the base's digit width.
pub fn radix_passes(len: usize, base: RadixBase) -> u32 {
    bits_needed(len).div_ceil(base.digit_bits())
}

fn bits_needed(len: usize) -> u32 {
    if len <= 1 {
        1
    } else {
        usize::BITS - (len - 1).leading_zeros()
    }
}

// Unconditional n outer passes: the comparison count stays n*(n-1) no matter
// the input order.
fn bubble_sort<H: RenderHook>(array: &mut InstrumentedArray<H>) -> Result<()> {
    let n = array.len();
    for _ in 0..n {
        for i in 0..n.saturating_sub(1) {
            if array.compare(i, i + 1) > 0 {
                array.swap(i + 1, i)?;
            }
        }
    }
    Ok(())
}

fn insertion_sort<H: RenderHook>(array: &mut InstrumentedArray<H>) -> Result<()> {
    let n = array.len();
    for k in 0..n {
        for i in (1..=k).rev() {
            if array.compare(i, i - 1) < 0 {
                array.swap(i, i - 1)?;
            } else {
                break;
            }
        }
    }
    Ok(())
}

fn quick_sort<H: RenderHook>(array: &mut InstrumentedArray<H>) -> Result<()> {
    let len = array.len();
    quick_sub_sort(array, 0, len)
}

// Lomuto partition around the last element with a `<=` predicate, so the
// pivot's resting index both ends the left range and starts the right one.
// The right range re-enters with its leading element in place; distinct
// values guarantee it shrinks. Degenerates to quadratic on sorted input.
fn quick_sub_sort<H: RenderHook>(
    array: &mut InstrumentedArray<H>,
    start: usize,
    end: usize,
) -> Result<()> {
    if end - start <= 1 {
        return Ok(());
    }

    let mut boundary = start;
    for j in start..end {
        if array.compare(j, end - 1) <= 0 {
            array.swap(boundary, j)?;
            boundary += 1;
        }
    }

    // The pivot matched itself on the final iteration, so boundary > start
    // and the element at boundary - 1 is the pivot.
    let pivot = boundary - 1;
    quick_sub_sort(array, start, pivot)?;
    quick_sub_sort(array, pivot, end)
}

fn merge_sort<H: RenderHook>(array: &mut InstrumentedArray<H>) -> Result<()> {
    let len = array.len();
    let mut guard = MergeGuard::default();
    merge_sub_sort(array, &mut guard, 0, len)
}

#[derive(Debug, Default)]
struct MergeGuard {
    last: Option<(usize, usize)>,
}

fn merge_sub_sort<H: RenderHook>(
    array: &mut InstrumentedArray<H>,
    guard: &mut MergeGuard,
    start: usize,
    end: usize,
) -> Result<()> {
    if end - start <= 1 {
        return Ok(());
    }

    // Identical bounds twice in a row means the recursion is broken.
    assert!(
        guard.last != Some((start, end)),
        "merge range {start}..{end} requested twice in a row"
    );
    guard.last = Some((start, end));

    let mid = start + (end - start) / 2;
    merge_sub_sort(array, guard, start, mid)?;
    merge_sub_sort(array, guard, mid, end)?;

    let mut i = start;
    let mut j = mid;
    let mut k = 0;
    while i < mid && j < end {
        if array.compare(i, j) < 0 {
            let value = array.read(i)?;
            array.scratch_write(k, value);
            i += 1;
        } else {
            let value = array.read(j)?;
            array.scratch_write(k, value);
            j += 1;
        }
        k += 1;
    }
    while i < mid {
        let value = array.read(i)?;
        array.scratch_write(k, value);
        i += 1;
        k += 1;
    }
    while j < end {
        let value = array.read(j)?;
        array.scratch_write(k, value);
        j += 1;
        k += 1;
    }

    for offset in 0..k {
        let value = array.scratch_read(offset);
        array.write(start + offset, value)?;
    }
    Ok(())
}

fn radix_sort<H: RenderHook>(array: &mut InstrumentedArray<H>, base: RadixBase) -> Result<()> {
    let n = array.len();
    let buckets = base.base() as usize;
    let mask = base.base() - 1;

    let mut bucket_next: Vec<usize> = vec![0; buckets];
    for pass in 0..radix_passes(n, base) {
        let shift = pass * base.digit_bits();

        // Digit histogram, then prefix sums as bucket start offsets. The
        // counting scan is bookkeeping only, not a visible data movement.
        bucket_next.fill(0);
        for value in array.values() {
            bucket_next[((value >> shift) & mask) as usize] += 1;
        }
        let mut offset = 0;
        for slot in bucket_next.iter_mut() {
            let count = *slot;
            *slot = offset;
            offset += count;
        }

        for i in 0..n {
            let value = array.read(i)?;
            let digit = ((value >> shift) & mask) as usize;
            array.scratch_write(bucket_next[digit], value);
            bucket_next[digit] += 1;
        }

        for i in 0..n {
            let value = array.scratch_read(i);
            array.write(i, value)?;
        }
    }
    Ok(())
}

// Scan for an inversion; reshuffle and start over on the first one found.
// Terminates only when a full scan comes back clean. Not part of the default
// programme.
fn bogo_sort<H: RenderHook>(
    array: &mut InstrumentedArray<H>,
    rng: &mut fastrand::Rng,
) -> Result<()> {
    'scan: loop {
        for i in 0..array.len().saturating_sub(1) {
            if array.compare(i + 1, i) < 0 {
                array.shuffle(rng)?;
                continue 'scan;
            }
        }
        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(len: usize, seed: u64) -> InstrumentedArray<()> {
        let mut array = InstrumentedArray::new(len, ());
        let mut rng = fastrand::Rng::with_seed(seed);
        array.shuffle(&mut rng).unwrap();
        array.reset_counters();
        array
    }

    fn assert_sorted(array: &InstrumentedArray<()>) {
        for (i, value) in array.values().iter().enumerate() {
            assert_eq!(*value, i as u32, "element {i} out of place");
        }
    }

    #[test]
    fn every_algorithm_sorts_shuffled_input() {
        let algorithms = [
            Algorithm::Bubble,
            Algorithm::Insertion,
            Algorithm::Quick,
            Algorithm::Merge,
            Algorithm::Radix(RadixBase::Four),
            Algorithm::Radix(RadixBase::Eight),
            Algorithm::Radix(RadixBase::Sixteen),
        ];

        for (round, algorithm) in algorithms.iter().enumerate() {
            let mut array = shuffled(128, round as u64 + 1);
            let mut rng = fastrand::Rng::with_seed(0);
            algorithm.run(&mut array, &mut rng).unwrap();
            assert_sorted(&array);
        }
    }

    #[test]
    fn quick_sort_handles_adversarial_orders() {
        for values in [
            (0..64).collect::<Vec<u32>>(),
            (0..64).rev().collect::<Vec<u32>>(),
        ] {
            let mut array = InstrumentedArray::with_values(values, ());
            let mut rng = fastrand::Rng::with_seed(0);
            Algorithm::Quick.run(&mut array, &mut rng).unwrap();
            assert_sorted(&array);
        }
    }

    #[test]
    fn bubble_comparison_count_is_input_independent() {
        let mut rng = fastrand::Rng::with_seed(0);
        for seed in [1, 7] {
            let mut array = shuffled(64, seed);
            Algorithm::Bubble.run(&mut array, &mut rng).unwrap();
            assert_eq!(array.counters().comparisons, 64 * 63);
        }

        let mut already_sorted = InstrumentedArray::new(64, ());
        Algorithm::Bubble.run(&mut already_sorted, &mut rng).unwrap();
        assert_eq!(already_sorted.counters().comparisons, 64 * 63);
    }

    #[test]
    fn insertion_on_reversed_input_checks_every_pair() {
        let mut array = InstrumentedArray::with_values(vec![7, 6, 5, 4, 3, 2, 1, 0], ());
        let mut rng = fastrand::Rng::with_seed(0);

        Algorithm::Insertion.run(&mut array, &mut rng).unwrap();

        assert_sorted(&array);
        assert_eq!(array.counters().comparisons, 28);
    }

    #[test]
    fn quick_sort_partitions_around_the_last_element() {
        let mut array = InstrumentedArray::with_values(vec![3, 1, 2], ());
        let mut rng = fastrand::Rng::with_seed(0);

        Algorithm::Quick.run(&mut array, &mut rng).unwrap();

        assert_eq!(array.values(), &[1, 2, 3]);
    }

    #[test]
    fn radix_pass_counts_cover_the_value_range() {
        assert_eq!(radix_passes(4096, RadixBase::Four), 6);
        assert_eq!(radix_passes(4096, RadixBase::Eight), 4);
        assert_eq!(radix_passes(4096, RadixBase::Sixteen), 3);
        assert_eq!(radix_passes(256, RadixBase::Four), 4);
        assert_eq!(radix_passes(256, RadixBase::Sixteen), 2);
    }

    #[test]
    fn bogo_sort_terminates_on_a_tiny_array() {
        let mut array = shuffled(4, 11);
        let mut rng = fastrand::Rng::with_seed(42);

        Algorithm::Bogo.run(&mut array, &mut rng).unwrap();

        assert_sorted(&array);
    }
}
