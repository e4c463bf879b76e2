//! Google Sheets and Drive backend for sheetload.
//!
//! This crate talks to the Sheets v4 and Drive v3 REST APIs with a bearer
//! token obtained elsewhere. [`Spreadsheet`] implements
//! [`sheetload::SpreadsheetHandle`], so a validated batch can be applied to a
//! live spreadsheet; the Drive calls provision that spreadsheet first.
//!
//! # Architecture
//!
//! ```text
//! sheetload::Dispatcher
//!     └── Spreadsheet (this crate)            values.clear / values.update
//!           └── GoogleClient                  bearer auth, JSON, error mapping
//!                 └── reqwest over HTTPS
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetload::prelude::*;
//! use sheetload_google::{GoogleClient, GoogleConfig, ShareTarget};
//!
//! # async fn example(operations: Vec<Operation>) -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let client = GoogleClient::new(GoogleConfig::with_token("ya29.token"))?;
//!
//! // Provision from a template
//! let file = client.copy_file("template-id", "Q3 report").await?;
//! client.move_file(&file.id, "folder-id").await?;
//! client
//!     .share_file(&file.id, &"ann@example.com:writer".parse::<ShareTarget>()?)
//!     .await?;
//!
//! // Apply the batch
//! let sheet = client.spreadsheet(&file.id);
//! let report = sheetload::run(&sheet, &FsSource::new(), &operations).await?;
//! println!("{} operations applied", report.applied_count());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod drive;
pub mod error;
pub mod spreadsheet;

pub use client::{GoogleClient, GoogleConfig, DRIVE_API_BASE, SHEETS_API_BASE};
pub use drive::{FileRef, Role, ShareTarget};
pub use error::GoogleError;
pub use spreadsheet::Spreadsheet;
