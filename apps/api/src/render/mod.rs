// Template selection, rendering and HTML export.
// The catalog is fixed at build time; rendering is pure and does no I/O.

pub mod catalog;
pub mod export;
pub mod handlers;
pub mod renderer;
