/// Operator dispatch and operand coercion.
pub mod core;
/// `+`, `-`, `*` and `/`, including the string forms of `+` and `*`.
pub mod arithmetic;
/// Exponentiation.
pub mod power;
/// Equality and ordering.
pub mod comparison;
/// `&&` and `||`.
pub mod logic;
