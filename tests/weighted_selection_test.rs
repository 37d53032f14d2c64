use caturro_rewards::AppError;
use caturro_rewards::utils::weighted::{Weighted, pick_random, pick_with_roll, total_weight};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct Sector {
    id: usize,
    weight: f64,
}

impl Weighted for Sector {
    fn weight(&self) -> f64 {
        self.weight
    }
}

fn wheel(weights: &[f64]) -> Vec<Sector> {
    weights
        .iter()
        .enumerate()
        .map(|(id, &weight)| Sector { id, weight })
        .collect()
}

#[test]
fn test_frequencies_follow_weights() {
    let weights = [50.0, 30.0, 15.0, 5.0, 0.0];
    let sectors = wheel(&weights);
    let total = total_weight(&sectors);
    let trials = 20_000;

    let mut rng = StdRng::seed_from_u64(20251018);
    let mut counts = [0usize; 5];
    for _ in 0..trials {
        let picked = pick_random(&sectors, &mut rng).unwrap();
        counts[picked.id] += 1;
    }

    assert_eq!(counts[4], 0);

    // 卡方检验，自由度 3，显著性 0.001 的临界值约 16.27
    let chi_squared: f64 = weights[..4]
        .iter()
        .zip(&counts[..4])
        .map(|(w, &observed)| {
            let expected = trials as f64 * w / total;
            (observed as f64 - expected).powi(2) / expected
        })
        .sum();
    assert!(chi_squared < 16.27, "chi-squared {chi_squared} too large");
}

#[test]
fn test_boundaries_are_half_open() {
    let sectors = wheel(&[90.0, 10.0]);

    assert_eq!(pick_with_roll(&sectors, 0.0).map(|s| s.id), Some(0));
    assert_eq!(pick_with_roll(&sectors, 85.0).map(|s| s.id), Some(0));
    assert_eq!(pick_with_roll(&sectors, 90.0).map(|s| s.id), Some(1));
    assert_eq!(pick_with_roll(&sectors, 95.0).map(|s| s.id), Some(1));
    assert!(pick_with_roll(&sectors, 100.0).is_none());
}

#[test]
fn test_degenerate_wheels() {
    let mut rng = StdRng::seed_from_u64(7);

    let empty: Vec<Sector> = Vec::new();
    assert!(matches!(
        pick_random(&empty, &mut rng),
        Err(AppError::NoPromotionsAvailable)
    ));

    let zeros = wheel(&[0.0, 0.0]);
    assert!(matches!(
        pick_random(&zeros, &mut rng),
        Err(AppError::InvalidState(_))
    ));
}
