//! Binary-level tests: display scenarios through the public library API and logger setup.

mod scenario_tests;
