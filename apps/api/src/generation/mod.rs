// Portfolio generation and lookup.
// All backends sit behind the GenerationService trait; handlers never
// call a backend without validating the profile first.

pub mod handlers;
pub mod mock;
pub mod remote;
pub mod service;
