pub mod catch_panic;
pub mod meltdown;
