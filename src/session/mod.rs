pub mod edit;
pub mod state;
