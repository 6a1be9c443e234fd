//! Shared networking constants and helpers used by client and server.

/// TCP port the relay listens on.
pub const SERVER_PORT: u16 = 8080;
/// Route serving the latest quote.
pub const QUOTE_PATH: &str = "/cotacao";
/// Relay URL the client targets when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/cotacao";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_matches_port_and_path() {
        let expected = format!("http://{}{}", addr("localhost", SERVER_PORT), QUOTE_PATH);
        assert_eq!(DEFAULT_SERVER_URL, expected);
    }
}
