mod differentiation_tests;
mod evaluation_tests;
mod property_tests;
