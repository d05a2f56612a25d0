use flowcore_core::{ContextDefinition, Factory, ExecutionContext, PipelineDefinitionBuilder, Solid, SolidDefinitionBuilder};
use flowcore_engine::{execute_pipeline, EngineError};

fn noop_context() -> ContextDefinition {
    ContextDefinition::new("default", |_info| Ok(Factory::direct(ExecutionContext::new())))
}

#[test]
fn an_unknown_context_name_fails_config_evaluation_before_any_context_opens() {
    let x_def = SolidDefinitionBuilder::new("x_def").transform(|_ctx, _inputs| Ok(Default::default()));
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", x_def))
        .context(noop_context())
        .build()
        .unwrap();

    let env = serde_json::json!({"context": {"name": "does-not-exist"}});
    let result = execute_pipeline(&pipeline, Some(env), true, None, None);

    assert!(matches!(result, Err(EngineError::Config(_))));
}
