pub mod auth;
pub mod dto;
pub mod favorites;
pub mod leaderboard;
pub mod players;
pub mod teams;
pub mod users;
