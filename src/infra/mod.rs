// Infrastructure adapters for application ports

pub mod http_client;
