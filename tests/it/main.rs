//! Single test binary entry point.
//!
//! All tests link into one binary to keep link times down.
//!
//! Structure:
//! - helpers: builders and gesture shortcuts shared by the tests
//! - integration: multi-component workflows driven through `Annotator`
//! - unit: single-component tests against the public API
