//! # ARCAD Assistant Core
//!
//! Question-routing and answer-retrieval pipeline for a product-catalog chat
//! assistant. Questions flow through a fixed ladder: conversational small
//! talk is answered from templates, catalog questions from the compiled
//! product table, and everything else through a retrieval-augmented
//! streaming answer grounded in text scraped from the vendor site.
//!
//! ## Core Concepts
//!
//! - **Orchestrator**: Single-flight state machine driving one question at a
//!   time through the pipeline, with bounded retry and cancellation
//! - **Classification**: Keyword ladders routing questions to locale,
//!   product, technical, integration, or general handling
//! - **Catalog**: Compiled product table answering detail, comparison, and
//!   listing questions without any network involvement
//! - **Context**: Scraped page text (with fallback and caching) grounding
//!   the model's answers
//! - **Events**: Every outcome reaches the UI as a [`events::ChatEvent`]
//!   pushed into an [`events::OutputSink`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use arcad_assistant::config::AssistantConfig;
//! use arcad_assistant::connector::gemini::GeminiConnector;
//! use arcad_assistant::context::WebContextResolver;
//! use arcad_assistant::events::StdOutSink;
//! use arcad_assistant::orchestrator::Orchestrator;
//!
//! # async fn run() -> Result<(), arcad_assistant::errors::AssistantError> {
//! let config = AssistantConfig::from_env()?;
//! let connector = GeminiConnector::new(&config.api_key, &config.model)?;
//! let resolver = WebContextResolver::new(&config.fallback_context_url)?;
//!
//! let assistant = Orchestrator::new(
//!     config,
//!     Arc::new(connector),
//!     Arc::new(resolver),
//!     Arc::new(StdOutSink::default()),
//! );
//!
//! assistant.submit_question("Tell me about ARCAD-Skipper").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Guide
//!
//! - [`orchestrator`] - Pipeline state machine, retry, cancellation
//! - [`classify`] - Question classification ladders
//! - [`catalog`] - Static product table and local answering
//! - [`conversation`] - Small-talk matching and canned responses
//! - [`context`] - Web context fetching, extraction, caching
//! - [`connector`] - Model connector trait and the Gemini implementation
//! - [`events`] - Chat events and output sinks
//! - [`session`] - Single-flight session slot
//! - [`config`] - Settings and pipeline tunables
//! - [`errors`] - Error taxonomy and user-facing messages
//! - [`telemetry`] - Tracing bootstrap

pub mod catalog;
pub mod classify;
pub mod config;
pub mod connector;
pub mod context;
pub mod conversation;
pub mod errors;
pub mod events;
pub mod orchestrator;
pub mod session;
pub mod telemetry;

pub use config::AssistantConfig;
pub use errors::AssistantError;
pub use events::{ChatEvent, OutputSink};
pub use orchestrator::Orchestrator;
