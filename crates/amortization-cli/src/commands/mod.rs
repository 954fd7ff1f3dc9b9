pub mod loan;
pub mod periods;
