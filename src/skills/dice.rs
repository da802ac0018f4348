//! Dice primitives
//!
//! Six-sided dice that explode: a 6 is rolled again and added, so any target
//! number is reachable, just increasingly unlikely.

use rand::Rng;

/// One exploding d6
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    let mut total = 0;
    loop {
        let face = rng.gen_range(1..=6);
        total += face;
        if face != 6 {
            return total;
        }
    }
}

/// Roll `dice` exploding d6 (sign ignored) and count those reaching `target`
pub fn count_successes<R: Rng + ?Sized>(rng: &mut R, dice: i32, target: i32) -> i32 {
    let mut successes = 0;
    for _ in 0..dice.unsigned_abs() {
        if roll_die(rng) >= target {
            successes += 1;
        }
    }
    successes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_die_never_lands_on_six() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..2000 {
            let roll = roll_die(&mut rng);
            assert!(roll >= 1);
            assert_ne!(roll % 6, 0, "an exploded total always adds a non-6 face");
        }
    }

    #[test]
    fn test_dice_explode_eventually() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!((0..2000).any(|_| roll_die(&mut rng) > 6));
    }

    #[test]
    fn test_target_one_always_succeeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(count_successes(&mut rng, 5, 1), 5);
    }

    #[test]
    fn test_negative_rating_uses_magnitude() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(count_successes(&mut rng, -3, 1), 3);
    }

    #[test]
    fn test_zero_dice_zero_successes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(count_successes(&mut rng, 0, 2), 0);
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        let xs: Vec<i32> = (0..50).map(|_| count_successes(&mut a, 4, 5)).collect();
        let ys: Vec<i32> = (0..50).map(|_| count_successes(&mut b, 4, 5)).collect();
        assert_eq!(xs, ys);
    }
}
