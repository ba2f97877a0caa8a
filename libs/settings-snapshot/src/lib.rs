//! Settings Snapshot Registry
//!
//! Exposes every eligible member of a settings struct as a [`Setting`] handle
//! that knows the member's current value, the value it had when last
//! synchronized (its default), and whether it changed since.
//!
//! ```
//! use settings_snapshot::Settings;
//! use std::cell::RefCell;
//!
//! #[derive(Settings)]
//! pub struct Service {
//!     pub timeout: i32,
//!     pub name: String,
//! }
//!
//! let target = RefCell::new(Service { timeout: 30, name: "svc".into() });
//! let mut snapshot = settings_snapshot::Scanner::default().snapshot(&target);
//!
//! let timeout = snapshot.get_mut("timeout").unwrap();
//! timeout.set_value("45");
//! assert!(timeout.changed());
//! timeout.reload();
//! assert!(!timeout.changed());
//! assert_eq!(target.borrow().timeout, 45);
//! ```

// Lets generated code refer to `::settings_snapshot` from inside this crate
extern crate self as settings_snapshot;

pub mod config;
pub mod convert;
pub mod error;
pub mod member;
pub mod scan;
pub mod setting;
pub mod sink;
pub mod snapshot;
pub mod value;

pub use config::{FloatComparison, SnapshotConfig, TypeNames};
pub use convert::convert;
pub use error::{ConversionError, SnapshotError, WriteError};
pub use member::{
    Access, MemberDescriptor, MemberDescriptorBuilder, Scope, Settings, SettingsBase, Visibility,
};
pub use scan::{scan, try_scan, Scan, Scanner};
pub use setting::Setting;
pub use sink::{NoOpSink, RecordingSink, TracingSink, WriteFailure, WriteFailureSink};
pub use snapshot::SettingsSnapshot;
pub use value::{SettingField, SettingType, SettingValue, ValueType};

/// Derives [`Settings`] for a struct with named fields
pub use settings_snapshot_macros::Settings;

// Used by `#[derive(Settings)]`; not part of the public API
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
