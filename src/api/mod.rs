//! Remote backend access: the transport seam and the typed API clients.

mod auth;
mod client;
mod endpoints;
mod records;
mod transport;

pub use auth::{AuthApi, AuthMode, AuthResponseData};
pub use client::ReqwestTransport;
pub use endpoints::Endpoints;
pub use records::{decode_records, RecordsApi, AUTH_QUERY_PARAM};
pub use transport::{HttpError, HttpRequest, HttpResponse, HttpTransport};
