pub mod logging;
pub mod llm;

// Model output -> CodeBundle (text extraction, JSON recovery, field defaulting)
pub mod codegen;

// HTTP surface: /api/generate, health, static preview client
pub mod server;
