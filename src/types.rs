pub mod color;
pub mod highlight;
pub mod match_candidate;
pub mod segment;
pub mod span;
