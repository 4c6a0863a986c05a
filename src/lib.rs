//! TocToc: conversational real-estate agents.
//!
//! Collection agents hold a multi-turn conversation with a language model,
//! validate every turn as a `{message, finished}` envelope, and once the
//! model declares collection finished, normalize the conversation into a
//! typed result (search filters, a mortgage application, or appraisal
//! inputs). An intent router picks the agent; a valuation client sends
//! finished appraisals to the valuation API.
//!
//! # Quick Start
//!
//! ```no_run
//! use toctoc::prelude::*;
//!
//! # async fn example() -> toctoc::error::Result<()> {
//! let config = ToctocConfig::from_env()?;
//! let gateway = ModelGateway::from_config(&config, Tracer::logging(config.project.clone()))?;
//!
//! let mut agent = PropertySearchAgent::property_search(gateway);
//! agent.add_user_message("Quiero una casa en Santiago con 3 habitaciones y 2 baños.");
//! let turn = agent.run().await?;
//! println!("{}", turn.output_text());
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod router;
pub mod telemetry;
pub mod types;
pub mod util;
pub mod valuation;

#[cfg(feature = "cli")]
pub mod cli;
