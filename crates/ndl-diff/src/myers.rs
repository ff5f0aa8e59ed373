//! Shortest edit scripts in linear space.
//!
//! Divide-and-conquer variant of Myers' O(ND) algorithm: each step finds the
//! middle snake of an optimal path by searching from both ends at once, then
//! recurses on the two halves. Memory is proportional to `a.len() + b.len()`.

use std::iter;
use std::ops::{Index, IndexMut};

/// One step of an edit script turning `a` into `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edit {
    /// Element common to both sides.
    Keep,
    /// Element of `a` only.
    Delete,
    /// Element of `b` only.
    Insert,
}

/// Minimal edit script turning `a` into `b`.
pub(crate) fn edit_script<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Edit> {
    let mut script = Vec::with_capacity(a.len().max(b.len()));
    let mut forward = Frontier::new(a.len() + b.len());
    let mut backward = Frontier::new(a.len() + b.len());
    conquer(a, b, &mut forward, &mut backward, &mut script);
    script
}

/// Furthest x reached on each diagonal `k = x - y`.
struct Frontier {
    offset: isize,
    xs: Vec<usize>,
}

impl Frontier {
    fn new(total: usize) -> Self {
        let reach = total / 2 + 2;
        Self {
            offset: reach as isize,
            xs: vec![0; 2 * reach + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.xs[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.xs[(k + self.offset) as usize]
    }
}

fn splits(x: usize, y: usize, n: usize, m: usize) -> bool {
    x <= n && y <= m && (x, y) != (0, 0) && (x, y) != (n, m)
}

fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

fn conquer<T: PartialEq>(
    a: &[T],
    b: &[T],
    forward: &mut Frontier,
    backward: &mut Frontier,
    script: &mut Vec<Edit>,
) {
    let prefix = common_prefix(a, b);
    script.extend(iter::repeat(Edit::Keep).take(prefix));
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = common_suffix(a, b);
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    if a.is_empty() {
        script.extend(iter::repeat(Edit::Insert).take(b.len()));
    } else if b.is_empty() {
        script.extend(iter::repeat(Edit::Delete).take(a.len()));
    } else {
        match middle_snake(a, b, forward, backward) {
            // A split at either corner would not shrink the problem.
            Some((x, y)) if splits(x, y, a.len(), b.len()) => {
                conquer(&a[..x], &b[..y], forward, backward, script);
                conquer(&a[x..], &b[y..], forward, backward, script);
            }
            _ => {
                script.extend(iter::repeat(Edit::Delete).take(a.len()));
                script.extend(iter::repeat(Edit::Insert).take(b.len()));
            }
        }
    }
    script.extend(iter::repeat(Edit::Keep).take(suffix));
}

/// Start of the middle snake of an optimal path, as `(x, y)` into `a` and `b`.
fn middle_snake<T: PartialEq>(
    a: &[T],
    b: &[T],
    forward: &mut Frontier,
    backward: &mut Frontier,
) -> Option<(usize, usize)> {
    let (n, m) = (a.len(), b.len());
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;
    forward[1] = 0;
    backward[1] = 0;

    let d_max = ((n + m + 1) / 2 + 1) as isize;
    for d in 0..d_max {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && forward[k - 1] < forward[k + 1]) {
                forward[k + 1]
            } else {
                forward[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let start = (x, y);
            if x < n && y < m {
                x += common_prefix(&a[x..], &b[y..]);
            }
            forward[k] = x;
            if odd && (k - delta).abs() < d && forward[k] + backward[delta - k] >= n {
                return Some(start);
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && backward[k - 1] < backward[k + 1]) {
                backward[k + 1]
            } else {
                backward[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let run = common_suffix(&a[..n - x], &b[..m - y]);
                x += run;
                y += run;
            }
            backward[k] = x;
            if !odd && (k - delta).abs() <= d && backward[k] + forward[delta - k] >= n {
                return match (n.checked_sub(x), m.checked_sub(y)) {
                    (Some(sx), Some(sy)) => Some((sx, sy)),
                    _ => None,
                };
            }
        }
    }
    None
}
