pub mod hasher;
pub mod sqlx;
pub mod time;
