pub mod methods;
pub mod predict;
