use flowcore_core::{OutputDefinition, PipelineDefinitionBuilder, RuntimeType, Solid, SolidDefinitionBuilder, DEFAULT_OUTPUT};
use flowcore_engine::execute_pipeline;
use std::collections::HashMap;

fn noop_context() -> flowcore_core::ContextDefinition {
    flowcore_core::ContextDefinition::new("default", |_info| {
        Ok(flowcore_core::Factory::direct(flowcore_core::ExecutionContext::new()))
    })
}

#[test]
fn single_solid_under_default_config_produces_its_output() {
    let x_def = SolidDefinitionBuilder::new("x_def")
        .output(OutputDefinition::new(DEFAULT_OUTPUT, RuntimeType::any("any")))
        .transform(|_ctx, _inputs| {
            let mut out = HashMap::new();
            out.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(42));
            Ok(out)
        });

    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", x_def))
        .context(noop_context())
        .build()
        .unwrap();

    let result = execute_pipeline(&pipeline, None, true, None, None).unwrap();
    assert!(result.success());
    assert_eq!(
        result.result_for_solid("x").unwrap().transformed_value(DEFAULT_OUTPUT).unwrap(),
        Some(serde_json::json!(42))
    );
}
