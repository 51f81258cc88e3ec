pub mod jokes;
pub mod messenger;
pub mod quota;
pub mod routing;
