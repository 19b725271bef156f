use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks `i` from the last index down to 1 and swaps it with a uniformly drawn
/// `j` in `0..=i`. Empty and single-element slices are left untouched.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
