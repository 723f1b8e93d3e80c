pub mod decompose;
pub mod planner;
pub mod split;

pub use decompose::{
    decompose_with_retry, DecomposeError, Decomposer, MockDecomposer, FALLBACK_STEPS,
};
pub use planner::{next_step, GeneratedPlan, Planner, PlannerConfig, StepView};
pub use split::split_tasks;
