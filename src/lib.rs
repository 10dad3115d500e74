//! # event-injector
//!
//! Translates JSON device-event documents into executable bus-command
//! injection scripts. The crate owns the generic pipeline (document
//! loading, payload normalization, field flattening, and the script-file
//! lifecycle) while concrete device families plug in their command
//! vocabulary through the [`generator::CommandSynthesis`] trait.
//!
//! ## Modules
//!
//! - `error` - Error taxonomy shared by the whole pipeline
//! - `events` - Events document loading and the device map model
//! - `flatten` - Nested-record flattening into dotted key/value fields
//! - `script` - Scoped temporary script file resource
//! - `generator` - Traversal engine and the device-family extension trait
//!
//! ## Example
//!
//! ```no_run
//! use event_injector::error::Result;
//! use event_injector::generator::{CommandSynthesis, ScriptGenerator};
//! use event_injector::script::ScriptFile;
//! use serde_json::Value;
//!
//! struct EchoFamily;
//!
//! impl CommandSynthesis for EchoFamily {
//!     fn open_script(&mut self, script: &mut ScriptFile) -> Result<()> {
//!         script.open("#!/bin/bash\n")
//!     }
//!
//!     fn synthesize_command(
//!         &mut self,
//!         device: &str,
//!         record: &Value,
//!         script: &mut ScriptFile,
//!     ) -> Result<()> {
//!         script.write(&format!("echo {device} {record}\n"))
//!     }
//!
//!     fn close_script(&mut self, script: &mut ScriptFile) -> Result<()> {
//!         script.close("")
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut generator = ScriptGenerator::new("events.json", Box::new(EchoFamily));
//! generator.generate()?;
//! println!("script at {}", generator.script_file().display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod events;
pub mod flatten;
pub mod generator;
pub mod script;
