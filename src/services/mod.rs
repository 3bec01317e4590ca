pub mod audit;
pub mod listings;
pub mod normalize;
