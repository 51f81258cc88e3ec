pub mod quota;
pub mod replies;
