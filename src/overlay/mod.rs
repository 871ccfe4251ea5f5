pub mod fit;
pub mod model;

pub use model::Zone;
