// Profile intake: multipart parsing, field validation and resume text extraction.
// Validation runs before any call to the generation service.

pub mod intake;
pub mod resume;
pub mod validation;
