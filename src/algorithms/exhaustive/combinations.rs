//! Lexicographic k-combinations of `0..n`.

/// Iterator over every size-`k` subset of `0..n`, as ascending index vectors,
/// in lexicographic order.
///
/// `k = 0` yields a single empty combination; `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
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

        // Rightmost position that can still move up.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - self.k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}
