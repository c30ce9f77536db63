//! Benchmark utilities.

use rand::Rng;
use txkv_core::Command;

/// Generate `count` random SET commands over `keys` keys and `values` values.
pub fn random_sets(count: usize, keys: usize, values: usize) -> Vec<Command> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| Command::Set {
            key: format!("k{}", rng.gen_range(0..keys)),
            value: format!("v{}", rng.gen_range(0..values)),
        })
        .collect()
}

/// Generate a random mixed workload rendered as protocol lines.
pub fn random_lines(count: usize, keys: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let key = rng.gen_range(0..keys);
            match rng.gen_range(0..4) {
                0 => format!("SET k{key} v{}", rng.gen_range(0..8)),
                1 => format!("GET k{key}"),
                2 => format!("UNSET k{key}"),
                _ => format!("NUMEQUALTO v{}", rng.gen_range(0..8)),
            }
        })
        .collect()
}
