use gale_report_model::RunCategory;
use std::time::Duration;

const DEFAULT_COOLDOWN_S: u64 = 5;

/// Pure function producing a fresh request body per cell, so create
/// operations do not trip duplicate-key conflicts across runs.
pub type BodyGenerator = fn() -> String;

/// A named load level.
#[derive(Debug, Clone)]
pub struct ScenarioDefinition {
    pub name: String,
    pub connections: u32,
    pub duration_s: u64,
    pub description: String,
}

impl ScenarioDefinition {
    pub fn new(name: &str, connections: u32, duration_s: u64, description: &str) -> Self {
        Self {
            name: name.to_string(),
            connections,
            duration_s,
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointDefinition {
    pub name: String,
    pub method: reqwest::Method,
    pub path: String,
    pub requires_auth: bool,
    pub body: Option<BodyGenerator>,
}

impl EndpointDefinition {
    pub fn get(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            method: reqwest::Method::GET,
            path: path.to_string(),
            requires_auth: false,
            body: None,
        }
    }

    pub fn post(name: &str, path: &str, body: BodyGenerator) -> Self {
        Self {
            name: name.to_string(),
            method: reqwest::Method::POST,
            path: path.to_string(),
            requires_auth: false,
            body: Some(body),
        }
    }

    /// Mark the endpoint as needing a bearer token. Cells for it are skipped
    /// when the auth bootstrap fails.
    pub fn with_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}

/// One (scenario, endpoint) pairing to be executed.
#[derive(Debug, Clone)]
pub struct Cell {
    pub scenario: ScenarioDefinition,
    pub endpoint: EndpointDefinition,
}

/// A complete suite: a category-tagged matrix of load levels and endpoints
/// plus the cooldown pacing between cells.
#[derive(Debug, Clone)]
pub struct SuiteDefinition {
    pub name: String,
    pub category: RunCategory,
    pub scenarios: Vec<ScenarioDefinition>,
    pub endpoints: Vec<EndpointDefinition>,
    pub cooldown: Duration,
}

impl SuiteDefinition {
    /// Flatten the matrix in row-major order: every endpoint for a scenario
    /// before the next (higher-load) scenario. The degradation scan depends
    /// on this ordering.
    pub fn cells(&self) -> Vec<Cell> {
        self.scenarios
            .iter()
            .flat_map(|scenario| {
                self.endpoints.iter().map(|endpoint| Cell {
                    scenario: scenario.clone(),
                    endpoint: endpoint.clone(),
                })
            })
            .collect()
    }

    pub fn requires_auth(&self) -> bool {
        self.endpoints.iter().any(|e| e.requires_auth)
    }
}

/// Builder for a suite definition.
///
/// This must be used at the start of a suite binary to define the matrix that
/// will be run. Recommended name is `env!("CARGO_PKG_NAME")`.
pub struct SuiteDefinitionBuilder {
    name: String,
    category: RunCategory,
    scenarios: Vec<ScenarioDefinition>,
    endpoints: Vec<EndpointDefinition>,
    cooldown_s: u64,
}

impl SuiteDefinitionBuilder {
    pub fn new(name: &str, category: RunCategory) -> Self {
        Self {
            name: name.to_string(),
            category,
            scenarios: Vec::new(),
            endpoints: Vec::new(),
            cooldown_s: DEFAULT_COOLDOWN_S,
        }
    }

    pub fn add_scenario(mut self, scenario: ScenarioDefinition) -> Self {
        self.scenarios.push(scenario);
        self
    }

    pub fn add_endpoint(mut self, endpoint: EndpointDefinition) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn with_cooldown_s(mut self, cooldown_s: u64) -> Self {
        self.cooldown_s = cooldown_s;
        self
    }

    pub fn build(self) -> anyhow::Result<SuiteDefinition> {
        if self.scenarios.is_empty() {
            anyhow::bail!("Suite [{}] has no scenarios", self.name);
        }
        if self.endpoints.is_empty() {
            anyhow::bail!("Suite [{}] has no endpoints", self.name);
        }
        for scenario in &self.scenarios {
            if scenario.connections == 0 || scenario.duration_s == 0 {
                anyhow::bail!(
                    "Scenario [{}] must have positive connections and duration",
                    scenario.name
                );
            }
        }

        // Ascending load order is load-bearing for the analysis, so enforce
        // it here rather than trusting the declaration order.
        let mut scenarios = self.scenarios;
        scenarios.sort_by_key(|s| s.connections);

        Ok(SuiteDefinition {
            name: self.name,
            category: self.category,
            scenarios,
            endpoints: self.endpoints,
            cooldown: Duration::from_secs(self.cooldown_s),
        })
    }
}
