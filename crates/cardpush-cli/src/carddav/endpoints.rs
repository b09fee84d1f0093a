//! CardDAV endpoint URL builders

/// Turn a `--server` value into a base URL without trailing slash
///
/// A bare host gets `https://`; an explicit `http://` or `https://` URL is
/// kept as given.
pub fn normalize_base_url(server: &str) -> String {
    let server = server.trim().trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("https://{}", server)
    }
}

/// URL of one contact resource in the personal address book
pub fn contact_url(base_url: &str, email: &str, id: &str) -> String {
    format!("{}/{}/ab/personal/{}.vcf", base_url, email, id)
}
