//! Energy optimization tips.

use rand::Rng;

pub const ENERGY_TIPS: [&str; 4] = [
    "Optimize pod aerodynamics to reduce energy consumption",
    "Schedule maintenance during off-peak hours",
    "Use regenerative braking to recover energy",
    "Monitor battery temperature for optimal performance",
];

pub fn random_energy_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ENERGY_TIPS[rng.gen_range(0..ENERGY_TIPS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tip_comes_from_fixed_list() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(ENERGY_TIPS.contains(&random_energy_tip(&mut rng)));
        }
    }

    #[test]
    fn test_all_tips_are_drawn() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..400 {
            seen.insert(random_energy_tip(&mut rng));
        }
        assert_eq!(seen.len(), ENERGY_TIPS.len());
    }
}
