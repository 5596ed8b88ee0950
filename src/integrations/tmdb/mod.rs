// src/integrations/tmdb/mod.rs
//
// Movie metadata API (TMDB) integration

pub mod client;
pub mod endpoints;
pub mod transport;

pub use client::RemoteClient;
pub use endpoints::{resolve, resolve_key, Operation, OperationFamily, ResolvedEndpoint};
pub use transport::{
    HttpMethod, ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};
