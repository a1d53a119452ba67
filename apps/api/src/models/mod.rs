pub mod dvi;
pub mod opportunity;
pub mod user;
