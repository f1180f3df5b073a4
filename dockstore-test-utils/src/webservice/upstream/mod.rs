//! Clients for the third-party services the webservice talks to.
//!
//! In tests their base URLs point at the simulations in [`crate::fixtures`].

pub mod github;
pub mod google;

use reqwest::Response;

use super::error::Error;

/// Passes successful responses through and turns failures into [`Error::Upstream`].
async fn check(service: &'static str, response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(Error::Upstream {
        service,
        url: response.url().to_string(),
        status: status.as_u16(),
    })
}
