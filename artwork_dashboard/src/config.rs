use artwork_registry::config::RegistryConfig;

const BIND_ADDRESS_ENV_VAR: &str = "DASHBOARD_BIND_ADDRESS";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8501";

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    pub bind_address: String,
    pub registry: RegistryConfig,
}

impl DashboardConfig {
    /// Read after the `.env` file has been applied, so it sees those values too.
    pub fn from_env() -> Self {
        let bind_address = std::env::var(BIND_ADDRESS_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Self {
            bind_address,
            registry: RegistryConfig::from_env(),
        }
    }
}
