use flowcore_core::{
    ContextDefinition, Factory, ExecutionContext, ExecutionMetadata, InputDefinition, OutputDefinition,
    PipelineDefinitionBuilder, PipelineEvent, RecordingEventSink, RuntimeType, Solid, SolidDefinitionBuilder, UserError,
    DEFAULT_OUTPUT,
};
use flowcore_engine::execute_pipeline;
use std::collections::HashMap;
use std::sync::Arc;

fn noop_context() -> ContextDefinition {
    ContextDefinition::new("default", |_info| Ok(Factory::direct(ExecutionContext::new())))
}

#[test]
fn a_non_throwing_user_error_is_recorded_and_the_run_reports_failure() {
    let a_def = SolidDefinitionBuilder::new("a_def")
        .output(OutputDefinition::new(DEFAULT_OUTPUT, RuntimeType::any("any")))
        .transform(|_ctx, _inputs| {
            let mut out = HashMap::new();
            out.insert(DEFAULT_OUTPUT.to_string(), serde_json::json!(1));
            Ok(out)
        });
    let b_def = SolidDefinitionBuilder::new("b_def")
        .input(InputDefinition::new("in", RuntimeType::any("any")))
        .transform(|_ctx, _inputs| {
            Err(UserError {
                solid: "b".to_string(),
                message: "boom".to_string(),
            })
        });

    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("a", a_def))
        .solid(Solid::new("b", b_def))
        .dependency("b", "in", "a", DEFAULT_OUTPUT)
        .context(noop_context())
        .build()
        .unwrap();

    let sink = Arc::new(RecordingEventSink::new());
    let meta = ExecutionMetadata::new().with_event_sink(sink.clone() as Arc<dyn flowcore_core::EventSink>);

    let result = execute_pipeline(&pipeline, None, false, Some(meta), None).unwrap();
    assert!(!result.success());

    let b_result = result.result_for_solid("b").unwrap();
    assert!(!b_result.success());

    let events = sink.events();
    assert!(events.iter().any(|e| matches!(e, PipelineEvent::PipelineFailure { .. })));
}
