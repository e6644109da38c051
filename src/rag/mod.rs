//! RAG (Retrieval-Augmented Generation) module
//!
//! Turns a customer chat message into the context and prompt for the
//! storefront assistant:
//! - Routing between product search and store-policy lookup
//! - Product retrieval through the hybrid index
//! - Policy retrieval over a chunked policy document
//! - Context and prompt assembly
//!
//! # Examples
//!
//! ```rust,no_run
//! use shoprag::config::AppConfig;
//! use shoprag::rag::RetrievalQuery;
//! use shoprag::rag::RetrievalService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = RetrievalService::new(&config);
//!
//!     let retrieval = service
//!         .retrieve(&RetrievalQuery {
//!             message: "cho tôi xem giỏ quà tết".to_string(),
//!             cart_items: Vec::new(),
//!             top_k: 10,
//!         })
//!         .await?;
//!     println!("Route: {}", retrieval.route);
//!     println!("Prompt:\n{}", retrieval.prompt);
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod policy;
pub mod prompts;
pub mod router;

pub use context::ContextAssembler;
pub use pipeline::Retrieval;
pub use pipeline::RetrievalQuery;
pub use pipeline::RetrievalService;
pub use policy::PolicyChunk;
pub use policy::PolicyIndex;
pub use router::route_query;
pub use router::QueryRoute;
