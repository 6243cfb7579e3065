use gale_runner::prelude::*;

fn fresh_register_body() -> String {
    register_body(&fresh_username())
}

/// Fresh title per cell so repeated runs don't collide on the slug.
fn fresh_article_body() -> String {
    serde_json::json!({
        "article": {
            "title": format!("Load Test Article {}", rand::random::<u32>()),
            "description": "An article created during load testing",
            "body": "Body of a generated article used to compare write latency against reads.",
            "tagList": ["testing", "loadtest"],
        }
    })
    .to_string()
}

fn main() -> GaleResult<()> {
    let suite =
        SuiteDefinitionBuilder::new(env!("CARGO_PKG_NAME"), RunCategory::EndpointComparison)
            .add_scenario(ScenarioDefinition::new(
                "moderate",
                50,
                10,
                "One mid-level load shared by every endpoint",
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
            .add_endpoint(EndpointDefinition::post(
                "POST /api/users/login",
                "/api/users/login",
                login_body,
            ))
            .add_endpoint(
                EndpointDefinition::get("GET /api/articles/feed", "/api/articles/feed?limit=20")
                    .with_auth(),
            )
            .add_endpoint(
                EndpointDefinition::post("POST /api/articles", "/api/articles", fresh_article_body)
                    .with_auth(),
            )
            .build()?;

    run(&suite)?;

    Ok(())
}
