mod send_api;

pub use send_api::SendApiClient;
