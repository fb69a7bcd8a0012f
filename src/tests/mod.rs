//! Cross-cutting integration tests over whole policy documents.
