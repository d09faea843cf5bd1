use axum::{
    body::Body,
    http::{Request, Response, StatusCode, header},
    middleware::Next,
};

/// `https://` URL on the apex domain for a `www.` host, or `None` when the
/// host needs no redirect.
fn apex_location(host: &str, path_and_query: &str) -> Option<String> {
    let apex = host.strip_prefix("www.")?;
    Some(format!("https://{apex}{path_and_query}"))
}

/// Permanently redirects `www.` requests to the apex domain.
pub async fn redirect_www(req: Request<Body>, next: Next) -> Response<Body> {
    let location = req
        .headers()
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .and_then(|host| {
            let path_and_query = req.uri().path_and_query().map_or("/", |pq| pq.as_str());
            apex_location(host, path_and_query)
        });

    let Some(location) = location else {
        return next.run(req).await;
    };

    match Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(header::LOCATION, &location)
        .body(Body::empty())
    {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%err, %location, "Could not build www redirect; serving request as is");
            next.run(req).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn www_hosts_redirect_to_apex() {
        assert_eq!(
            apex_location("www.expostands.com", "/stands/modular?ref=ad"),
            Some("https://expostands.com/stands/modular?ref=ad".to_owned())
        );
    }

    #[test]
    fn apex_and_other_hosts_are_left_alone() {
        assert_eq!(apex_location("expostands.com", "/"), None);
        assert_eq!(apex_location("blog.expostands.com", "/"), None);
    }
}
