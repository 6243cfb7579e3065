use gale_runner::prelude::*;

fn fresh_register_body() -> String {
    register_body(&fresh_username())
}

fn main() -> GaleResult<()> {
    let suite = SuiteDefinitionBuilder::new(env!("CARGO_PKG_NAME"), RunCategory::Baseline)
        .add_scenario(ScenarioDefinition::new(
            "baseline",
            10,
            10,
            "Light steady load for reference numbers",
        ))
        .add_endpoint(EndpointDefinition::get("GET /api/tags", "/api/tags"))
        .add_endpoint(EndpointDefinition::get(
            "GET /api/articles",
            "/api/articles?limit=20",
        ))
        .add_endpoint(EndpointDefinition::get(
            "GET /api/articles/:slug",
            "/api/articles/how-to-train-your-dragon",
        ))
        .add_endpoint(EndpointDefinition::post(
            "POST /api/users",
            "/api/users",
            fresh_register_body,
        ))
        .build()?;

    run(&suite)?;

    Ok(())
}
