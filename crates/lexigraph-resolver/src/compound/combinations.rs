//! Order-preserving index combinations.

/// Yields every `k`-combination of `0..n` as ascending index vectors, in
/// lexicographic order: `(0,1) (0,2) (1,2)` for `n = 3, k = 2`.
///
/// Yields nothing when `k == 0` or `k > n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        // Rightmost position that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < i + self.n - k) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_choose_two() {
        let combs: Vec<Vec<usize>> = Combinations::new(3, 2).collect();
        assert_eq!(combs, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn test_counts() {
        assert_eq!(Combinations::new(5, 3).count(), 10);
        assert_eq!(Combinations::new(4, 4).count(), 1);
        assert_eq!(Combinations::new(4, 1).count(), 4);
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(3, 0).count(), 0);
        assert_eq!(Combinations::new(0, 1).count(), 0);
    }
}
