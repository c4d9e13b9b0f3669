use crate::algo::visits::Levels;
use parking_lot::Mutex;

/// Per-level node lists shared by the workers of a parallel visit.
///
/// Each level has its own lock; appends to different levels never contend.
pub struct LevelBuckets {
    buckets: Box<[Mutex<Vec<String>>]>,
}

impl LevelBuckets {
    /// Creates `depth + 1` empty buckets.
    pub fn new(depth: usize) -> Self {
        Self {
            buckets: (0..=depth).map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    /// The maximum level that can be recorded.
    pub fn depth(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Appends `node` to the bucket of `level`.
    ///
    /// Returns `false`, recording nothing, if `level` exceeds the depth.
    pub fn record(&self, level: usize, node: &str) -> bool {
        match self.buckets.get(level) {
            Some(bucket) => {
                bucket.lock().push(node.to_owned());
                true
            }
            None => false,
        }
    }

    pub fn into_levels(self) -> Levels {
        Levels::from(
            self.buckets
                .into_vec()
                .into_iter()
                .map(|bucket| bucket.into_inner())
                .collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_record() {
        let buckets = LevelBuckets::new(2);
        assert_eq!(buckets.depth(), 2);
        assert!(buckets.record(0, "A"));
        assert!(buckets.record(2, "D"));
        assert!(buckets.record(1, "B"));
        assert!(buckets.record(1, "C"));
        assert!(!buckets.record(3, "E"));

        let levels = buckets.into_levels();
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], ["A"]);
        assert_eq!(levels[1], ["B", "C"]);
        assert_eq!(levels[2], ["D"]);
    }

    #[test]
    fn test_depth_zero() {
        let levels = LevelBuckets::new(0).into_levels();
        assert_eq!(levels.len(), 1);
        assert!(levels[0].is_empty());
    }
}
