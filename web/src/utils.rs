use js_sys::Math;

/// Seed for a new game when none was given in the URL fragment.
///
/// `Math.random` carries at most 53 random bits, so the seed is assembled
/// from two 32 bit draws.
pub(crate) fn new_game_seed() -> u64 {
    let draw = || (Math::random() * f64::from(u32::MAX)) as u64;
    (draw() << 32) | draw()
}
