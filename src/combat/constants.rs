//! Combat constants - all tunable values in one place
//!
//! Wound boxes are looked up by final stage. Reach differences become
//! the opposed-roll bias, capped both ways.

// Severity stages
/// Net successes needed to raise a wound one stage
pub const SUCCESSES_PER_STAGE: i32 = 2;
/// Boxes of damage by final stage: none, light, moderate, serious, deadly
pub const STAGE_BOXES: [i32; 5] = [0, 1, 3, 6, 10];
/// Highest stage a wound can reach
pub const MAX_STAGE: i32 = 4;

// Reach
/// Bias granted per point of reach advantage
pub const REACH_BIAS_PER_STEP: i32 = 1;
/// Largest bias reach alone can produce
pub const MAX_REACH_BIAS: i32 = 3;
/// Reach of bare hands and feet
pub const UNARMED_REACH: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_table_increasing() {
        assert!(STAGE_BOXES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(STAGE_BOXES.len() as i32, MAX_STAGE + 1);
    }

    #[test]
    fn test_reach_constants_reasonable() {
        assert!(REACH_BIAS_PER_STEP > 0);
        assert!(MAX_REACH_BIAS >= REACH_BIAS_PER_STEP);
    }
}
