use flowcore_core::{
    ContextDefinition, ExecutionContext, Factory, PipelineDefinitionBuilder, ResourceDefinition, Solid,
    SolidDefinitionBuilder, UserError,
};
use flowcore_engine::execute_pipeline;
use parking_lot::Mutex;
use std::sync::Arc;

fn recording_resource(name: &'static str, log: Arc<Mutex<Vec<&'static str>>>) -> ResourceDefinition {
    let teardown_log = log.clone();
    ResourceDefinition::new(name, move |_info| {
        let teardown_log = teardown_log.clone();
        Ok(Factory::scoped(
            move || Ok(Arc::new(name) as flowcore_core::ResourceValue),
            move |_value| {
                teardown_log.lock().push(name);
                Ok(())
            },
        ))
    })
}

#[test]
fn resources_tear_down_in_reverse_order_after_a_raised_step_error() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let context_teardown_log = log.clone();
    let context_definition = ContextDefinition::new("default", move |_info| {
        let context_teardown_log = context_teardown_log.clone();
        Ok(Factory::scoped(
            || Ok(ExecutionContext::new()),
            move |_ctx| {
                context_teardown_log.lock().push("user_context");
                Ok(())
            },
        ))
    })
    .with_resource(recording_resource("r1", log.clone()))
    .with_resource(recording_resource("r2", log.clone()));

    let failing_def = SolidDefinitionBuilder::new("failing_def").transform(|_ctx, _inputs| {
        Err(UserError {
            solid: "x".to_string(),
            message: "boom".to_string(),
        })
    });

    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", failing_def))
        .context(context_definition)
        .build()
        .unwrap();

    let result = execute_pipeline(&pipeline, None, true, None, None);
    assert!(result.is_err());

    assert_eq!(*log.lock(), vec!["r2", "r1", "user_context"]);
}
