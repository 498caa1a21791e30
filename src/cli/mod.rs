pub mod member;
pub mod seed;
pub mod server;
