//! Mason Core
//!
//! Foundational primitives shared by the Mason crates:
//!
//! - **Events**: the pointer / resize events a host surface delivers, and the
//!   disposable subscription handles used to register for them
//! - **State Machines**: small typed transition tables for engine lifecycle and
//!   per-tile interaction states
//!
//! # Example
//!
//! ```rust
//! use mason_core::fsm::StateMachine;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Light { Off, On }
//!
//! let mut fsm = StateMachine::builder(Light::Off)
//!     .on(Light::Off, 1u32, Light::On)
//!     .on(Light::On, 2u32, Light::Off)
//!     .build();
//!
//! assert_eq!(fsm.send(1), Some(Light::On));
//! assert_eq!(fsm.send(1), None);
//! ```

pub mod events;
pub mod fsm;

pub use events::{Event, EventData, EventDispatcher, EventType, NodeId, SubscriptionId};
pub use fsm::StateMachine;
