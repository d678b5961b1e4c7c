// stardeck - terminal star and flag controls for a texts site
//
// The texts site renders each text page with two scripted controls: a flag
// link that highlights on hover, and a star link that POSTs to
// /texts/{id}/star with a CSRF header and fills its icon on success. This
// crate drives that same interaction contract from a terminal:
//
// - Page model: the controls' class sets and identifiers, mutated idempotently
// - Star client (reqwest): the single network operation
// - Interaction handler: explicit event-to-effect bindings over mpsc channels
// - TUI (ratatui): renders the controls, captures mouse hover and clicks
// - CLI (clap): config management and a headless one-shot star

pub mod cli;
pub mod client;
pub mod config;
pub mod demo;
pub mod events;
pub mod handler;
pub mod logging;
pub mod page;
pub mod startup;
pub mod tui;
