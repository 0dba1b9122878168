// Database entities (SeaORM models)
pub mod news;
pub mod project;
pub mod tool;
pub mod user;
