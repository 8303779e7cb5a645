use rand::Rng;
use rand::rngs::StdRng;

/// The outcome of one two-die roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// First die, 1..=6.
    pub die1: u32,
    /// Second die, 1..=6.
    pub die2: u32,
    /// Step budget: `die1 + die2 + bonus`, floored at 1.
    pub total: u32,
}

/// Roll 2d6 with a signed step modifier.
///
/// The floor guarantees a turn always grants at least one step, no matter
/// how deep the accumulated debuff is.
pub fn roll_dice(rng: &mut StdRng, bonus: i32) -> DiceRoll {
    let die1: u32 = rng.random_range(1..=6);
    let die2: u32 = rng.random_range(1..=6);
    let total = (die1 as i32 + die2 as i32 + bonus).max(1) as u32;
    DiceRoll { die1, die2, total }
}
