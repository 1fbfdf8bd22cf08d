//! Seeded train/test splitting

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use super::record::PlantRecord;

/// Errors that can occur when splitting a dataset
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("train fraction must be strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),
}

/// Partition `records` into disjoint train and test subsets.
///
/// Row indices are shuffled with a generator seeded by `seed` and cut at
/// `floor(n * train_fraction)`, so the same seed and input order always
/// produce the same partition, and the two subsets cover the input exactly.
pub fn train_test_split(
    records: &[PlantRecord],
    train_fraction: f64,
    seed: u64,
) -> Result<(Vec<PlantRecord>, Vec<PlantRecord>), SplitError> {
    if !(train_fraction > 0.0 && train_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(train_fraction));
    }

    let mut indices: Vec<usize> = (0..records.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let cut = (records.len() as f64 * train_fraction) as usize;
    let train = indices[..cut].iter().map(|&i| records[i]).collect();
    let test = indices[cut..].iter().map(|&i| records[i]).collect();

    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<PlantRecord> {
        (0..n)
            .map(|i| PlantRecord {
                temperature: i as f64,
                vacuum: 40.0,
                pressure: 1013.0,
                humidity: 60.0,
                power: 400.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn test_split_counts_sum_to_total() {
        let data = records(101);
        let (train, test) = train_test_split(&data, 0.8, 12345).unwrap();

        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 21);
        assert_eq!(train.len() + test.len(), data.len());
    }

    #[test]
    fn test_split_is_deterministic_for_a_seed() {
        let data = records(50);
        let first = train_test_split(&data, 0.8, 12345).unwrap();
        let second = train_test_split(&data, 0.8, 12345).unwrap();

        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_different_seeds_shuffle_differently() {
        let data = records(50);
        let (train_a, _) = train_test_split(&data, 0.8, 1).unwrap();
        let (train_b, _) = train_test_split(&data, 0.8, 2).unwrap();

        assert_ne!(train_a, train_b);
    }

    #[test]
    fn test_subsets_are_disjoint() {
        let data = records(40);
        let (train, test) = train_test_split(&data, 0.75, 9).unwrap();

        // Rows are unique by construction, so membership can be checked by value.
        for row in &test {
            assert!(!train.contains(row));
        }
    }

    #[test]
    fn test_invalid_fraction_is_rejected() {
        let data = records(10);
        assert!(train_test_split(&data, 0.0, 1).is_err());
        assert!(train_test_split(&data, 1.0, 1).is_err());
        assert!(train_test_split(&data, f64::NAN, 1).is_err());
    }
}
