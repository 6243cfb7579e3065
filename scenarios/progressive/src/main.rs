use gale_runner::prelude::*;

/// Connection ladder against the article list, ascending so the degradation
/// scan can compare each level against the previous one.
fn main() -> GaleResult<()> {
    let suite = SuiteDefinitionBuilder::new(env!("CARGO_PKG_NAME"), RunCategory::Progressive)
        .add_scenario(ScenarioDefinition::new("light", 10, 10, "Warm-up level"))
        .add_scenario(ScenarioDefinition::new("moderate", 50, 10, "Typical traffic"))
        .add_scenario(ScenarioDefinition::new("heavy", 100, 10, "Peak traffic"))
        .add_scenario(ScenarioDefinition::new(
            "stress",
            250,
            10,
            "Beyond expected peak",
        ))
        .add_scenario(ScenarioDefinition::new(
            "extreme",
            500,
            10,
            "Find the breaking point",
        ))
        .add_endpoint(EndpointDefinition::get(
            "GET /api/articles",
            "/api/articles?limit=20",
        ))
        .with_cooldown_s(10)
        .build()?;

    run(&suite)?;

    Ok(())
}
