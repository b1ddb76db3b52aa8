pub mod support;

mod inspiration_tests;
mod invoker_tests;
mod model_tests;
mod refinement_tests;
mod studio_tests;
