//! # homework-watch
//!
//! Watches the review status of a homework on the Practicum API and reports
//! every change to a Telegram chat.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             Poller                               │
//! │                                                                  │
//! │  cursor ──▶ ┌──────────┐   ┌───────────┐   ┌────────┐   ┌──────┐ │
//! │             │   api    │──▶│ validate  │──▶│ status │──▶│notify│ │
//! │             │ (fetch)  │   │ (shape)   │   │(verdict)   │      │ │
//! │             └──────────┘   └───────────┘   └────────┘   └──────┘ │
//! │                   │              │              │          ▲     │
//! │                   └──────────────┴──────────────┴─ incident┘     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: the [`StatusApi`] trait, the HTTP [`PracticumClient`] and
//!   response shape checks
//! - **[`status`]**: status codes and their verdict sentences
//! - **[`notify`]**: the [`Notifier`] trait and the [`TelegramNotifier`]
//! - **[`poller`]**: the poll loop, cursor and incident suppression
//! - **[`config`]**: [`Settings`] loaded from the environment and an optional file
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! export PRACTICUM_TOKEN=... TELEGRAM_TOKEN=... TELEGRAM_CHAT_ID=...
//! homework-watch --config homework-watch.toml
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::time::Duration;
//! use homework_watch::{PracticumClient, Poller, TelegramNotifier};
//!
//! # tokio_test::block_on(async {
//! let api = PracticumClient::builder().token("practicum-token").build().unwrap();
//! let notifier = TelegramNotifier::builder()
//!     .token("bot-token")
//!     .chat_id("123456")
//!     .build()
//!     .unwrap();
//!
//! let mut poller = Poller::new(api, notifier, 0, Duration::from_secs(600));
//! let outcome = poller.poll_once().await;
//! println!("{:?}", outcome);
//! # });
//! ```

pub mod api;
pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod notify;
pub mod poller;
pub mod status;

// Re-export main types for convenience
pub use api::{Homework, PracticumClient, StatusApi};
pub use config::Settings;
pub use error::{ClientBuildError, ConfigError, ErrorKind, NotifyError, PollError};
pub use notify::{Notifier, TelegramNotifier};
pub use poller::{CycleOutcome, Poller};
pub use status::{classify, HomeworkStatus};
