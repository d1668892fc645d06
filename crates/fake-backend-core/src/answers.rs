//! Prompt answers and their substitution mapping

use crate::templates::renderer::Substitutions;

/// Default server port offered by the prompts.
pub const DEFAULT_SERVER_PORT: u16 = 8081;

/// Default API prefix offered by the prompts.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Default custom header name offered by the prompts.
pub const DEFAULT_HEADER_NAME: &str = "X-Powered-By";

/// Default custom header value offered by the prompts.
pub const DEFAULT_HEADER_VALUE: &str = "http-fake-backend";

/// A custom response header sent with every faked endpoint response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomHeader {
    pub name: String,
    pub value: String,
}

/// Everything the user answered (or passed as flags) for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub server_port: u16,
    pub api_prefix: String,
    pub custom_header: Option<CustomHeader>,
}

impl Answers {
    /// Build the placeholder mapping consumed by the template renderer.
    ///
    /// When no custom header is configured the header keys map to empty
    /// strings, so the generated `.env` keeps its `CUSTOM_HEADER_NAME=` and
    /// `CUSTOM_HEADER_VALUE=` lines with empty values.
    pub fn substitutions(&self) -> Substitutions {
        let mut vars = Substitutions::new();
        vars.insert("serverPort", self.server_port.to_string());
        vars.insert("apiPrefix", self.api_prefix.clone());

        let (name, value) = match &self.custom_header {
            Some(header) => (header.name.as_str(), header.value.as_str()),
            None => ("", ""),
        };
        vars.insert("customHeader", if self.custom_header.is_some() { "true" } else { "false" });
        vars.insert("customHeaderName", name);
        vars.insert("customHeaderValue", value);

        vars
    }
}

impl Default for Answers {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            custom_header: Some(CustomHeader {
                name: DEFAULT_HEADER_NAME.to_string(),
                value: DEFAULT_HEADER_VALUE.to_string(),
            }),
        }
    }
}
