#![allow(dead_code)]

use ewah::Bitmap;
use rand::Rng;

/// Ascending positions below `max`, each kept with probability `density`.
pub fn random_positions<R>(rng: &mut R, max: u64, density: f64) -> Vec<u64>
where
    R: Rng,
{
    (0..max).filter(|_| rng.gen_bool(density)).collect()
}

/// Ascending positions made of runs of set bits separated by random gaps.
pub fn random_runs<R>(rng: &mut R, runs: usize, max_gap: u64, max_len: u64) -> Vec<u64>
where
    R: Rng,
{
    let mut vec = Vec::new();
    let mut next = 0;
    for _ in 0..runs {
        next += rng.gen_range(0..max_gap);
        for _ in 0..rng.gen_range(1..max_len) {
            vec.push(next);
            next += 1;
        }
    }
    vec
}

pub fn build(positions: &[u64]) -> Bitmap {
    let mut bitmap = Bitmap::new();
    for &pos in positions {
        bitmap.set(pos).unwrap();
    }
    bitmap
}

macro_rules! setup {
    ( $rng:expr, $runs:expr, $gap:expr, $len:expr ) => {{
        let positions = helper::random_runs(&mut $rng, $runs, $gap, $len);
        let bitmap = helper::build(&positions);
        (positions, bitmap)
    }};
}
