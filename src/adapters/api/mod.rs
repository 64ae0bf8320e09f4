//! Risk backend adapters.

mod http_client;
mod mock_client;

pub use http_client::HttpAssessmentApi;
pub use mock_client::{MockAssessmentApi, MockCall};
