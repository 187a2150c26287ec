//! Point awards for a round.

/// Score that ends the game
pub const WINNING_SCORE: u32 = 100;

/// Score a lottery win sets for the winner
pub const LOTTERY_SCORE: u32 = 100;

/// Reward for identifying all three digits, indexed by guesses made before
/// the successful one (capped at the last entry)
const FINDING_POINTS: [u32; 5] = [50, 40, 30, 20, 10];

/// Bonus for arranging on the first attempt
const EARLY_ARRANGEMENT_BONUS: u32 = 10;

/// Bonus for arranging on a later attempt
const LATE_ARRANGEMENT_BONUS: u32 = 5;

/// Points for finding all three digits after `prior_guesses` earlier guesses
pub fn finding_points(prior_guesses: usize, multiplier: u32) -> u32 {
    FINDING_POINTS[prior_guesses.min(FINDING_POINTS.len() - 1)] * multiplier
}

/// Bonus for a correct arrangement, decided by the attempts left before it.
///
/// Three (extra-arrangement power-up) and two both pay the early bonus.
/// The double-points multiplier never applies here.
pub fn arrangement_bonus(arrangements_remaining: u8) -> u32 {
    match arrangements_remaining {
        3 | 2 => EARLY_ARRANGEMENT_BONUS,
        _ => LATE_ARRANGEMENT_BONUS,
    }
}

/// Consolation for running out of guesses, based on the best match count seen
pub fn consolation_points(best_match_count: u8, multiplier: u32) -> u32 {
    let base = match best_match_count {
        2 => 5,
        1 => 4,
        _ => 3,
    };
    base * multiplier
}

/// Whether a score ends the game
pub fn is_winning(score: u32) -> bool {
    score >= WINNING_SCORE
}
