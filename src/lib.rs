pub mod commands;
pub mod github;
pub mod http;
pub mod nav;
pub mod notes;
pub mod posts;
pub mod release;
pub mod render;
pub mod runtime;
