use std::collections::VecDeque;

/// Count 4-connected regions of `true` cells.
///
/// Diagonal neighbours do not join regions. Rows may differ in length; missing
/// cells count as water.
pub fn count_islands(grid: &[Vec<bool>]) -> usize {
    let mut visited: Vec<Vec<bool>> = grid.iter().map(|row| vec![false; row.len()]).collect();
    let mut islands = 0;

    for (start_row, cells) in grid.iter().enumerate() {
        for (start_col, &land) in cells.iter().enumerate() {
            if !land || visited[start_row][start_col] {
                continue;
            }

            // BFS over this island
            islands += 1;
            let mut queue = VecDeque::new();
            queue.push_back((start_row, start_col));
            visited[start_row][start_col] = true;

            while let Some((row, col)) = queue.pop_front() {
                for (r, c) in neighbors(row, col) {
                    let is_land = grid
                        .get(r)
                        .and_then(|cells| cells.get(c))
                        .copied()
                        .unwrap_or(false);
                    if is_land && !visited[r][c] {
                        visited[r][c] = true;
                        queue.push_back((r, c));
                    }
                }
            }
        }
    }

    islands
}

fn neighbors(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = row.checked_sub(1).map(|r| (r, col));
    let left = col.checked_sub(1).map(|c| (row, c));
    [up, left, Some((row + 1, col)), Some((row, col + 1))]
        .into_iter()
        .flatten()
}
