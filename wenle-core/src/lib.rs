//! Curiosity pet engine with an AI question judge.
//!
//! This crate provides:
//! - Deterministic pet state transitions (daily decay, healing, level-ups)
//! - An AI judge that scores submitted questions via Gemini
//! - JSON persistence of the pet record
//!
//! # Quick Start
//!
//! ```ignore
//! use wenle_core::{PetSession, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = PetSession::open(SessionConfig::default()).await?;
//!
//!     let response = session.ask("为什么猫会发出呼噜声?").await?;
//!     println!("{} pts - {}", response.rating.score, response.rating.comment);
//!     println!("Health: {}%", response.health);
//!
//!     Ok(())
//! }
//! ```

pub mod judge;
pub mod session;
pub mod state;
pub mod store;
pub mod testing;

// Primary public API
pub use judge::{CuriosityJudge, JudgeConfig, Rating};
pub use session::{AskResponse, PetSession, SessionConfig, SessionError};
pub use state::{PetState, QuestionRecord};
pub use store::{PetStore, StoreError};
pub use testing::{MockJudge, TestHarness};
