/// Deterministic seat orders for an `N`-agent table. Entry `i` of an order is
/// the index of the agent sitting in seat `i`.
pub struct SeatPermutations {
    permutations: Vec<Vec<usize>>,
}

impl SeatPermutations {
    pub fn new(seats: usize, count: usize) -> Self {
        let limit = count.min(Self::max_for(seats));
        let mut permutations = Vec::with_capacity(limit);
        let mut base: Vec<usize> = (0..seats).collect();
        generate(&mut base, 0, limit, &mut permutations);
        Self { permutations }
    }

    /// Number of distinct seat orders, `seats!`.
    pub fn max_for(seats: usize) -> usize {
        (1..=seats).product()
    }

    pub fn as_slice(&self) -> &[Vec<usize>] {
        &self.permutations
    }
}

fn generate(data: &mut [usize], start: usize, limit: usize, output: &mut Vec<Vec<usize>>) {
    if output.len() >= limit {
        return;
    }

    if start + 1 >= data.len() {
        output.push(data.to_vec());
        return;
    }

    for idx in start..data.len() {
        data.swap(start, idx);
        generate(data, start + 1, limit, output);
        data.swap(start, idx);
        if output.len() >= limit {
            break;
        }
    }
}
