pub mod model;
pub mod validation;
