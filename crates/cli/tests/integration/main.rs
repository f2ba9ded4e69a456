mod plan_tests;
mod stage_tests;
