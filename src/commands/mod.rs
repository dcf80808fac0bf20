pub mod plan;
pub mod split;
