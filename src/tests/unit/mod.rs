//! Unit tests over complete stat blocks.

mod ingestion;
