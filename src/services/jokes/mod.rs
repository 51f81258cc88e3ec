mod client;

pub use client::JokeClient;
