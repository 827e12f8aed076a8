use rand::seq::index;
use rand::Rng;

/// Two distinct indices from `0..n` in random order, or `None` if `n < 2`.
pub fn pick_two_distinct<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let picked = index::sample(rng, n, 2);
    Some((picked.index(0), picked.index(1)))
}

/// Two distinct indices from `0..n` with the smaller one first.
pub fn pick_two_sorted<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Option<(usize, usize)> {
    pick_two_distinct(rng, n).map(|(a, b)| if a < b { (a, b) } else { (b, a) })
}
