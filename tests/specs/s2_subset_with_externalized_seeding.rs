use flowcore_core::{
    ContextDefinition, Factory, ExecutionContext, InputDefinition, OutputDefinition, PipelineDefinitionBuilder,
    RuntimeType, Solid, SolidDefinitionBuilder,
};
use flowcore_engine::{create_execution_plan_core, execute_externalized_plan, MarshalOutputRequest};
use flowcore_storage::JsonSerializationStrategy;
use std::collections::HashMap;
use std::sync::Arc;

fn json_type() -> RuntimeType {
    RuntimeType::with_strategy("json", Arc::new(JsonSerializationStrategy))
}

fn noop_context() -> ContextDefinition {
    ContextDefinition::new("default", |_info| Ok(Factory::direct(ExecutionContext::new())))
}

fn abc_pipeline() -> flowcore_core::PipelineDefinition {
    let a_def = SolidDefinitionBuilder::new("a_def")
        .output(OutputDefinition::new("result", json_type()))
        .transform(|_ctx, _inputs| {
            let mut out = HashMap::new();
            out.insert("result".to_string(), serde_json::json!("from-a"));
            Ok(out)
        });
    let passthrough = |name: &str| {
        SolidDefinitionBuilder::new(name)
            .input(InputDefinition::new("in", json_type()))
            .output(OutputDefinition::new("result", json_type()))
            .transform(|_ctx, inputs| {
                let mut out = HashMap::new();
                out.insert("result".to_string(), inputs["in"].clone());
                Ok(out)
            })
    };

    PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("a", a_def))
        .solid(Solid::new("b", passthrough("b_def")))
        .solid(Solid::new("c", passthrough("c_def")))
        .dependency("b", "in", "a", "result")
        .dependency("c", "in", "b", "result")
        .context(noop_context())
        .build()
        .unwrap()
}

#[test]
fn a_prior_runs_output_seeds_a_later_subset_run() {
    let pipeline = abc_pipeline();
    let plan = create_execution_plan_core(&pipeline, None);
    let dir = tempfile::tempdir().unwrap();
    let a_path = dir.path().join("a.json").to_str().unwrap().to_string();

    execute_externalized_plan(
        &pipeline,
        &plan,
        &["a.transform".to_string()],
        None,
        Some(HashMap::from([(
            "a.transform".to_string(),
            vec![MarshalOutputRequest {
                output: "result".to_string(),
                path: a_path.clone(),
            }],
        )])),
        None,
        None,
        true,
    )
    .unwrap();

    let results = execute_externalized_plan(
        &pipeline,
        &plan,
        &["b.transform".to_string(), "c.transform".to_string()],
        Some(HashMap::from([(
            "b.transform".to_string(),
            HashMap::from([("in".to_string(), a_path)]),
        )])),
        None,
        None,
        None,
        true,
    )
    .unwrap();

    assert_eq!(results.len(), 2);
    let c_result = results.iter().find(|r| r.step_key() == "c.transform").unwrap();
    match c_result {
        flowcore_core::StepResult::Success { data, .. } => {
            assert_eq!(data.output_values["result"], serde_json::json!("from-a"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
