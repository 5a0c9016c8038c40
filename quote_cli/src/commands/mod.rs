pub mod cost;
pub mod materials;
pub mod offer;
