// Domain layer - Pure decision logic

pub mod context;
pub mod directive;
pub mod errors;
pub mod model;
pub mod plugins;
pub mod policy;
pub mod rules;
