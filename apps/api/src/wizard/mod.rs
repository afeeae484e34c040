// Server-side wizard: collect profile → submit → show results or error.
// One Wizard per browser session, polled by the client.

pub mod controller;
pub mod handlers;
pub mod sessions;
pub mod view_model;
