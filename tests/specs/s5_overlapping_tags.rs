use flowcore_core::{ContextDefinition, Factory, ExecutionContext, ExecutionMetadata, PipelineDefinitionBuilder, Solid, SolidDefinitionBuilder};
use flowcore_engine::{execute_pipeline, EngineError};
use std::collections::HashMap;

fn prod_tagged_context() -> ContextDefinition {
    ContextDefinition::new("default", |_info| {
        Ok(Factory::direct(
            ExecutionContext::new().with_tags(HashMap::from([("env".to_string(), "prod".to_string())])),
        ))
    })
}

#[test]
fn overlapping_user_and_metadata_tags_fail_before_step_execution() {
    let x_def = SolidDefinitionBuilder::new("x_def").transform(|_ctx, _inputs| Ok(Default::default()));
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", x_def))
        .context(prod_tagged_context())
        .build()
        .unwrap();

    let meta = ExecutionMetadata::new().with_tags(HashMap::from([("env".to_string(), "dev".to_string())]));
    let result = execute_pipeline(&pipeline, None, true, Some(meta), None);

    assert!(matches!(result, Err(EngineError::Core(_))));
}
