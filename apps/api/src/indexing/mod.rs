// Job indexing: flatten job files into index items, embed them and push
// them to the vector store in batches. Also hosts the startup indexer and
// the push/clear/search routes.

pub mod flatten;
pub mod handlers;
pub mod hash;
pub mod startup;
pub mod upsert;
