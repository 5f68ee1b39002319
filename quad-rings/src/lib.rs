pub mod errors;
pub mod euclid;
pub mod integer;
pub mod number_theory;
pub mod render;
pub mod ring;

pub use errors::AlgebraicError;
pub use euclid::{GcdOutcome, euclidean_gcd};
pub use integer::{AlgebraicInteger, QuadraticInteger, RingInteger};
pub use ring::QuadraticRing;
