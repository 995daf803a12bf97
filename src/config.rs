/// Transport and negotiation headers that are never reported as undeclared
pub const STANDARD_HEADERS: &[&str] = &[
    "accept",
    "accept-charset",
    "accept-encoding",
    "accept-language",
    "authorization",
    "cache-control",
    "connection",
    "content-encoding",
    "content-language",
    "content-length",
    "content-type",
    "cookie",
    "date",
    "expect",
    "forwarded",
    "host",
    "if-match",
    "if-modified-since",
    "if-none-match",
    "if-unmodified-since",
    "keep-alive",
    "origin",
    "pragma",
    "proxy-authorization",
    "range",
    "referer",
    "te",
    "traceparent",
    "tracestate",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "user-agent",
    "via",
    "x-forwarded-for",
    "x-forwarded-host",
    "x-forwarded-proto",
    "x-request-id",
];

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Report request headers that the operation does not declare
    pub check_undeclared: bool,
    /// Header names exempt from the undeclared check (case-insensitive)
    pub allowed_headers: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            check_undeclared: true,
            allowed_headers: STANDARD_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl ValidatorConfig {
    /// Defaults, adjusted by `HORNET_CHECK_UNDECLARED` and `HORNET_ALLOWED_HEADERS`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.check_undeclared = std::env::var("HORNET_CHECK_UNDECLARED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        if let Ok(extra) = std::env::var("HORNET_ALLOWED_HEADERS") {
            // "x-api-key,x-tenant" format
            for name in extra.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                config = config.allow_header(name);
            }
        }

        config
    }

    pub fn allow_header(mut self, name: impl Into<String>) -> Self {
        self.allowed_headers.push(name.into());
        self
    }

    pub fn with_undeclared_check(mut self, enabled: bool) -> Self {
        self.check_undeclared = enabled;
        self
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed_headers
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(name))
    }
}
