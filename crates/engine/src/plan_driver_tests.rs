use super::*;
use flowcore_core::test_support::{constant_solid_def, noop_context_definition, passthrough_solid_def};
use flowcore_core::{PipelineDefinitionBuilder, Solid, DEFAULT_OUTPUT};

#[test]
fn single_solid_pipeline_succeeds_under_default_context() {
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("x", constant_solid_def("x_def", 42)))
        .context(noop_context_definition("default"))
        .build()
        .unwrap();

    let result = execute_pipeline(&pipeline, None, true, None, None).unwrap();
    assert!(result.success());
    assert_eq!(
        result.result_for_solid("x").unwrap().transformed_value(DEFAULT_OUTPUT).unwrap(),
        Some(serde_json::json!(42))
    );
}

#[test]
fn pipeline_with_no_solids_succeeds_with_an_empty_result_set() {
    let pipeline = PipelineDefinitionBuilder::new("empty")
        .context(noop_context_definition("default"))
        .build()
        .unwrap();

    let result = execute_pipeline(&pipeline, None, true, None, None).unwrap();
    assert!(result.solid_results.is_empty());
    assert!(result.success());
}

#[test]
fn subset_excluding_a_solids_producer_fails_the_leading_step_invariant() {
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("a", constant_solid_def("a_def", 1)))
        .solid(Solid::new("b", passthrough_solid_def("pass_def")))
        .dependency("b", "in", "a", DEFAULT_OUTPUT)
        .context(noop_context_definition("default"))
        .build()
        .unwrap();

    let subset = vec!["b".to_string()];
    let result = execute_pipeline(&pipeline, None, true, None, Some(&subset));
    assert!(result.is_err());
}

#[test]
fn subset_keeping_only_the_root_solid_succeeds() {
    let pipeline = PipelineDefinitionBuilder::new("p")
        .solid(Solid::new("a", constant_solid_def("a_def", 1)))
        .solid(Solid::new("b", passthrough_solid_def("pass_def")))
        .dependency("b", "in", "a", DEFAULT_OUTPUT)
        .context(noop_context_definition("default"))
        .build()
        .unwrap();

    let subset = vec!["a".to_string()];
    let result = execute_pipeline(&pipeline, None, true, None, Some(&subset)).unwrap();
    assert_eq!(result.solid_results.len(), 1);
    assert_eq!(
        result.result_for_solid("a").unwrap().transformed_value(DEFAULT_OUTPUT).unwrap(),
        Some(serde_json::json!(1))
    );
}

#[test]
fn pipeline_run_can_be_drained_one_solid_at_a_time() {
    let pipeline = flowcore_core::test_support::linear_pipeline("p");
    let pipeline = PipelineDefinitionBuilder::new(pipeline.name)
        .solid(pipeline.solids[0].clone())
        .solid(pipeline.solids[1].clone())
        .dependency("sink", "in", "source", DEFAULT_OUTPUT)
        .context(noop_context_definition("default"))
        .build()
        .unwrap();

    let mut run = PipelineRun::open(&pipeline, None, true, None, None).unwrap();
    let mut names = Vec::new();
    while let Some(result) = run.next_solid_result() {
        names.push(result.solid_name);
    }
    assert_eq!(names, vec!["source", "sink"]);
    assert!(run.success_so_far());
    run.close().unwrap();
}
