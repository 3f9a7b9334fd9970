pub mod opportunity;
pub mod session;
pub mod turn;
