mod connectivity;
mod fetch;
mod fetch_error;
mod transport;

pub use connectivity::{Clock, ConnectivityProber, SystemClock, DEFAULT_PROBE_URL};
pub use fetch::{FetchOptions, ResilientFetcher, Sleeper, ThreadSleeper, DEFAULT_TIMEOUT};
pub use fetch_error::FetchError;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError};
