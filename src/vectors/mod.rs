// Word vector providers: trait-based abstraction over the embedding model.
//
// The WordVectors trait defines the interface the analyzer depends on. The
// default backend runs all-MiniLM-L6-v2 locally through ONNX; a static
// GloVe-style table can be used instead (and is what the tests use).

pub mod download;
pub mod onnx;
pub mod table;
pub mod traits;
