pub mod periods;
pub mod requisitions;
pub mod settings;
pub mod templates;
