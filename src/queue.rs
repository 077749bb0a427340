//! Bucketed min-priority queue used as the search frontier.
//!
//! Values sharing an exact priority live in one bucket. Buckets are kept sorted by
//! descending priority so the minimum bucket is always the last element, which makes
//! `extract_min` a pair of `Vec::pop` calls. Within a bucket the most recently
//! inserted value comes out first.
use thiserror::Error;

/// Returned by `BucketQueue::extract_min` on an empty queue.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("extract_min called on an empty priority queue")]
pub struct QueueEmpty;

#[derive(Clone, Debug)]
pub struct BucketQueue<T> {
    /// `(priority, values)` pairs, strictly descending by priority, never empty buckets.
    buckets: Vec<(f64, Vec<T>)>,
    len: usize,
}

impl<T> Default for BucketQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BucketQueue<T> {
    pub fn new() -> Self {
        BucketQueue {
            buckets: Vec::new(),
            len: 0,
        }
    }

    /// Binary search for the bucket holding exactly `priority`.
    ///
    /// `Ok(index)` if it exists, `Err(index)` where it would have to be inserted.
    fn find_bucket(&self, priority: f64) -> Result<usize, usize> {
        self.buckets
            .binary_search_by(|(p, _)| priority.total_cmp(p))
    }

    /// Adds `value` with the given priority in `O(log B)` where B is the number of
    /// distinct priorities present.
    pub fn insert(&mut self, value: T, priority: f64) {
        self.len += 1;
        match self.find_bucket(priority) {
            Ok(idx) => self.buckets[idx].1.push(value),
            Err(idx) => self.buckets.insert(idx, (priority, vec![value])),
        }
    }

    /// Removes and returns the most recently inserted value among those with the
    /// lowest priority.
    ///
    /// # Examples
    /// ```
    /// use npuzzle_solver::queue::BucketQueue;
    /// let mut q = BucketQueue::new();
    /// q.insert("a", 3.0);
    /// q.insert("b", 1.0);
    /// q.insert("c", 3.0);
    /// assert_eq!(q.extract_min(), Ok("b"));
    /// assert_eq!(q.extract_min(), Ok("c"));
    /// assert_eq!(q.extract_min(), Ok("a"));
    /// assert!(q.extract_min().is_err());
    /// ```
    pub fn extract_min(&mut self) -> Result<T, QueueEmpty> {
        let (_, bucket) = self.buckets.last_mut().ok_or(QueueEmpty)?;
        let value = bucket.pop().ok_or(QueueEmpty)?;
        if bucket.is_empty() {
            self.buckets.pop();
        }
        self.len -= 1;
        Ok(value)
    }

    /// Linear scan, lowest priority first. Returns the first value matching `pred`.
    pub fn find<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.buckets
            .iter()
            .rev()
            .flat_map(|(_, bucket)| bucket.iter())
            .find(|v| pred(v))
    }

    /// Linear scan removing every value matching `pred`. Returns how many were removed.
    pub fn filter<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.len;
        for (_, bucket) in self.buckets.iter_mut() {
            bucket.retain(|v| !pred(v));
        }
        self.buckets.retain(|(_, bucket)| !bucket.is_empty());
        self.len = self.buckets.iter().map(|(_, b)| b.len()).sum();
        before - self.len
    }

    /// Linear scan removing the first value (lowest priority first) matching `pred`.
    pub fn filter_one<F>(&mut self, mut pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        for b in (0..self.buckets.len()).rev() {
            let bucket = &mut self.buckets[b].1;
            if let Some(pos) = bucket.iter().position(|v| pred(v)) {
                bucket.remove(pos);
                if bucket.is_empty() {
                    self.buckets.remove(b);
                }
                self.len -= 1;
                return true;
            }
        }
        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: PartialEq> BucketQueue<T> {
    /// Linear membership test.
    pub fn has(&self, x: &T) -> bool {
        self.find(|v| v == x).is_some()
    }

    /// Linear lookup of an entry equal to `x`.
    pub fn get(&self, x: &T) -> Option<&T> {
        self.find(|v| v == x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(q: &mut BucketQueue<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(v) = q.extract_min() {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_extract_order_with_lifo_ties() {
        let mut q = BucketQueue::new();
        q.insert("five", 5.0);
        q.insert("three-a", 3.0);
        q.insert("three-b", 3.0);
        q.insert("one", 1.0);
        assert_eq!(q.len(), 4);
        assert_eq!(drain(&mut q), vec!["one", "three-b", "three-a", "five"]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_extract_min_on_empty() {
        let mut q: BucketQueue<u32> = BucketQueue::new();
        assert_eq!(q.extract_min(), Err(QueueEmpty));
        q.insert(1, 0.0);
        assert_eq!(q.extract_min(), Ok(1));
        assert_eq!(q.extract_min(), Err(QueueEmpty));
    }

    #[test]
    fn test_buckets_sorted_and_pruned() {
        let mut q = BucketQueue::new();
        for (v, p) in [(1, 4.0), (2, 2.0), (3, 9.0), (4, 2.0), (5, 0.5)] {
            q.insert(v, p);
        }
        let priorities: Vec<f64> = q.buckets.iter().map(|(p, _)| *p).collect();
        assert_eq!(priorities, vec![9.0, 4.0, 2.0, 0.5]);
        assert_eq!(q.buckets.last().map(|(p, _)| *p), Some(0.5));

        q.extract_min().unwrap();
        assert_eq!(q.buckets.last().map(|(p, _)| *p), Some(2.0));
        assert_eq!(q.buckets.len(), 3);
    }

    #[test]
    fn test_fractional_priorities() {
        let mut q = BucketQueue::new();
        q.insert('a', 2.0f64.sqrt());
        q.insert('b', 1.5);
        q.insert('c', 2.0f64.sqrt());
        assert_eq!(drain(&mut q), vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_has_and_get() {
        let mut q = BucketQueue::new();
        q.insert(10, 1.0);
        q.insert(20, 2.0);
        assert!(q.has(&20));
        assert!(!q.has(&30));
        assert_eq!(q.get(&10), Some(&10));
        assert_eq!(q.get(&30), None);
        assert_eq!(q.find(|v| *v > 15), Some(&20));
    }

    #[test]
    fn test_filter_removes_all_matches() {
        let mut q = BucketQueue::new();
        for i in 0..10 {
            q.insert(i, (i % 3) as f64);
        }
        let removed = q.filter(|v| v % 2 == 0);
        assert_eq!(removed, 5);
        assert_eq!(q.len(), 5);
        let mut rest = drain(&mut q);
        rest.sort();
        assert_eq!(rest, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_filter_prunes_empty_buckets() {
        let mut q = BucketQueue::new();
        q.insert(1, 1.0);
        q.insert(2, 2.0);
        assert_eq!(q.filter(|v| *v == 1), 1);
        assert_eq!(q.buckets.last().map(|(p, _)| *p), Some(2.0));
        assert_eq!(q.extract_min(), Ok(2));
        assert!(q.is_empty());
    }

    #[test]
    fn test_filter_one() {
        let mut q = BucketQueue::new();
        q.insert(7, 3.0);
        q.insert(7, 1.0);
        q.insert(8, 1.0);
        assert!(q.filter_one(|v| *v == 7));
        assert_eq!(q.len(), 2);
        // The low-priority 7 went first.
        assert_eq!(q.extract_min(), Ok(8));
        assert_eq!(q.extract_min(), Ok(7));
        assert!(!q.filter_one(|v| *v == 7));
    }
}
