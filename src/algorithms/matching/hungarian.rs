//! Rectangular Hungarian algorithm (rows ≤ columns) with potentials.

const INF: i64 = i64::MAX / 4;

/// Minimum-cost assignment of every row of `cost` to a distinct column.
///
/// Returns the total cost and, per row, the column it takes. Returns `None`
/// when there are more rows than columns or the rows differ in length.
///
/// Runs in O(n² m) for `n` rows and `m` columns.
pub(crate) fn min_cost_assignment(cost: &[Vec<i64>]) -> Option<(i64, Vec<usize>)> {
    let n = cost.len();
    if n == 0 {
        return Some((0, Vec::new()));
    }
    let m = cost[0].len();
    if n > m || cost.iter().any(|row| row.len() != m) {
        return None;
    }

    // 1-based: column 0 and row 0 are sentinels.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![INF; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = INF;
            let mut j1 = 0usize;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let reduced = cost[i0 - 1][j - 1] - u[i0] - v[j];
                if reduced < minv[j] {
                    minv[j] = reduced;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Augment along the alternating path.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let mut columns = vec![0usize; n];
    for j in 1..=m {
        if p[j] != 0 {
            columns[p[j] - 1] = j - 1;
        }
    }
    let total = columns
        .iter()
        .enumerate()
        .map(|(row, &col)| cost[row][col])
        .sum();
    Some((total, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_textbook_instance() {
        let cost = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        let (total, columns) = min_cost_assignment(&cost).unwrap();
        assert_eq!(total, 5);
        assert_eq!(columns, vec![1, 0, 2]);
    }

    #[test]
    fn rectangular_leaves_expensive_column_unused() {
        let cost = vec![vec![9, 1, 9, 2], vec![1, 9, 9, 9]];
        let (total, columns) = min_cost_assignment(&cost).unwrap();
        assert_eq!(total, 2);
        assert_eq!(columns, vec![1, 0]);
    }

    #[test]
    fn negative_costs_are_supported() {
        let cost = vec![vec![-100, 0], vec![0, 5]];
        let (total, _) = min_cost_assignment(&cost).unwrap();
        assert_eq!(total, -95);
    }

    #[test]
    fn more_rows_than_columns_fails() {
        assert!(min_cost_assignment(&[vec![1], vec![2]]).is_none());
    }

    #[test]
    fn empty_problem_costs_nothing() {
        assert_eq!(min_cost_assignment(&[]), Some((0, Vec::new())));
    }
}
