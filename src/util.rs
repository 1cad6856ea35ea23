/// Numeric conversion helpers.
///
/// The language only has double precision numbers, but a few operations need
/// an integer: string repetition counts and the operands of `modulus`. These
/// helpers do that conversion and report values that cannot be converted
/// instead of silently saturating.
pub mod num;
