// ticketscope services
// The search core (time window, query builder, result filter, title classifier),
// its orchestration, settings persistence and text rendering.

pub mod query_builder;
pub mod renderer;
pub mod result_filter;
pub mod settings_engine;
pub mod ticket_search;
pub mod time_window;
pub mod title_classifier;
