/// S3 configuration shared across services

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Config {
    /// Region override for the S3 client. `None` keeps the region resolved
    /// by the AWS default chain (env, profile, IMDS).
    pub region: Option<String>,
    /// Custom endpoint (LocalStack, MinIO). `None` means the AWS default.
    pub endpoint: Option<String>,
    /// Whether to use path-style URLs (false = virtual-hosted-style)
    pub path_style: bool,
}

impl S3Config {
    /// Load S3 configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load S3 configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let endpoint = non_empty("S3_ENDPOINT");

        Self {
            region: non_empty("S3_REGION"),
            // Custom endpoints are almost always path-style only
            path_style: non_empty("S3_PATH_STYLE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(endpoint.is_some()),
            endpoint,
        }
    }
}
