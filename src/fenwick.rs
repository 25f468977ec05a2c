use alloc::vec::Vec;
use core::cmp;

/// Fenwick tree over resolved item heights in layout units.
///
/// Point update and prefix query are `O(log n)`; the two rank queries descend the tree in
/// `O(log n)` as well. Integer nodes keep every update exact and reversible, and prefix sums are
/// monotone by construction.
#[derive(Clone, Debug)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed
    total: u64,
    max_bit: usize,
}

impl Fenwick {
    pub(crate) fn new() -> Self {
        Self {
            tree: alloc::vec![0],
            total: 0,
            max_bit: 0,
        }
    }

    /// Builds the tree in `O(n)`.
    pub(crate) fn from_values(values: impl IntoIterator<Item = u64>) -> Self {
        let mut tree = alloc::vec![0u64];
        tree.extend(values);
        let n = tree.len() - 1;
        let mut total = 0u64;
        for i in 1..=n {
            total = total.saturating_add(tree[i]);
            let j = i + lsb(i);
            if j <= n {
                tree[j] = tree[j].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            max_bit: max_bit_for(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }
        // Node `i` only covers values at indexes `<= i`, so dropping the tail leaves the
        // remaining nodes valid.
        self.total = self.prefix_sum(new_len);
        self.tree.truncate(new_len + 1);
        self.max_bit = max_bit_for(new_len);
    }

    /// Appends a value in `O(log n)`.
    pub(crate) fn push_value(&mut self, value: u64) {
        let new_len = self.len() + 1;
        self.tree.push(0);
        self.total = self.total.saturating_add(value);

        // tree[i] holds the sum of the lsb(i) values ending at i; recover the part that already
        // exists from prefix sums.
        let start_exclusive = new_len - lsb(new_len);
        let before = self
            .prefix_sum(new_len - 1)
            .saturating_sub(self.prefix_sum(start_exclusive));
        self.tree[new_len] = before.saturating_add(value);

        self.max_bit = max_bit_for(new_len);
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        debug_assert!(index < n, "Fenwick index out of range (idx={index}, len={n})");
        if delta >= 0 {
            self.total = self.total.saturating_add(delta as u64);
        } else {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
        let mut i = index + 1;
        while i <= n {
            let cur = self.tree[i] as i128;
            let next = cur + delta as i128;
            debug_assert!(next >= 0, "Fenwick underflow (idx={i}, cur={cur}, delta={delta})");
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values (clamped to `len`).
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = cmp::min(count, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Returns the largest `count` with `prefix_sum(count) <= target`.
    pub(crate) fn count_at_most(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }

    /// Returns the largest `count` with `prefix_sum(count) < target`.
    ///
    /// Returns `0` when `target == 0`.
    pub(crate) fn count_below(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] < target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn max_bit_for(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}
