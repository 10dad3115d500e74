//! Script generation pipeline
//!
//! [`ScriptGenerator`] walks a parsed events document and drives a
//! [`CommandSynthesis`] implementation: the generator owns traversal,
//! payload normalization, and the script-file lifecycle, while the concrete
//! device family owns script framing and the per-record command vocabulary.
//!
//! The pipeline is synchronous and single-threaded; one generator performs
//! one translation run.

use crate::error::Result;
use crate::events;
use crate::script::ScriptFile;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Per-device-family hooks for script framing and command synthesis.
///
/// The generator calls [`open_script`](Self::open_script) once, then
/// [`synthesize_command`](Self::synthesize_command) for every normalized
/// record, then [`close_script`](Self::close_script) once. Implementations
/// write through the supplied [`ScriptFile`] and must not mutate the record
/// they are given.
pub trait CommandSynthesis {
    /// Open the script, writing whatever header the family wants
    fn open_script(&mut self, script: &mut ScriptFile) -> Result<()>;

    /// Emit the bus command line(s) for one device record
    fn synthesize_command(
        &mut self,
        device: &str,
        record: &Value,
        script: &mut ScriptFile,
    ) -> Result<()>;

    /// Write the family's trailer (if any) and close the script
    fn close_script(&mut self, script: &mut ScriptFile) -> Result<()>;
}

/// Translates one events document into one executable script.
///
/// The generated file lives at [`script_file`](Self::script_file) until the
/// generator drops, at which point it is removed unless the caller moved it
/// first. A failed run leaves teardown to the same drop path, so partially
/// written scripts are cleaned up too.
pub struct ScriptGenerator {
    events_path: PathBuf,
    script: ScriptFile,
    synthesis: Box<dyn CommandSynthesis>,
}

impl ScriptGenerator {
    /// Create a generator for the events document at `events_path`
    pub fn new(events_path: impl Into<PathBuf>, synthesis: Box<dyn CommandSynthesis>) -> Self {
        Self {
            events_path: events_path.into(),
            script: ScriptFile::new(),
            synthesis,
        }
    }

    /// Run the full translation: load, traverse, synthesize, close.
    ///
    /// A document with no devices is a successful no-op: no file is created
    /// and no hook runs. Any loader or hook failure aborts the run
    /// immediately.
    pub fn generate(&mut self) -> Result<()> {
        let document = events::load_events(&self.events_path)?;
        if document.is_empty() {
            debug!(
                "no devices in {}, skipping script generation",
                self.events_path.display()
            );
            return Ok(());
        }

        self.synthesis.open_script(&mut self.script)?;
        for (device, payload) in &document {
            self.generate_device_commands(device, payload)?;
        }
        self.synthesis.close_script(&mut self.script)?;

        info!(
            "generated script for {} devices: {}",
            document.len(),
            self.script.path().display()
        );
        Ok(())
    }

    /// Normalize one device payload into records and synthesize each one.
    ///
    /// An array payload yields one record per element, named by appending
    /// the zero-based element index to the device name (`fanA0`, `fanA1`,
    /// ...). Anything else is a single record under the bare device name.
    fn generate_device_commands(&mut self, device: &str, payload: &Value) -> Result<()> {
        match payload {
            Value::Array(records) => {
                for (index, record) in records.iter().enumerate() {
                    let record_device = format!("{device}{index}");
                    self.synthesis
                        .synthesize_command(&record_device, record, &mut self.script)?;
                }
                Ok(())
            }
            record => self
                .synthesis
                .synthesize_command(device, record, &mut self.script),
        }
    }

    /// Path of the generated script; empty if no run produced one
    pub fn script_file(&self) -> &Path {
        self.script.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InjectorError;
    use std::cell::RefCell;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CallLog {
        opened: u32,
        closed: u32,
        devices: Vec<String>,
    }

    /// Family that records hook invocations and emits one line per record
    struct RecordingFamily {
        log: Rc<RefCell<CallLog>>,
        fail_on_device: Option<String>,
    }

    impl RecordingFamily {
        fn new(log: Rc<RefCell<CallLog>>) -> Self {
            Self {
                log,
                fail_on_device: None,
            }
        }

        fn failing_on(log: Rc<RefCell<CallLog>>, device: &str) -> Self {
            Self {
                log,
                fail_on_device: Some(device.to_string()),
            }
        }
    }

    impl CommandSynthesis for RecordingFamily {
        fn open_script(&mut self, script: &mut ScriptFile) -> Result<()> {
            self.log.borrow_mut().opened += 1;
            script.open("#!/bin/bash\n")
        }

        fn synthesize_command(
            &mut self,
            device: &str,
            record: &Value,
            script: &mut ScriptFile,
        ) -> Result<()> {
            if self.fail_on_device.as_deref() == Some(device) {
                return Err(InjectorError::Write {
                    path: script.path().to_path_buf(),
                    source: io::Error::other("family rejected record"),
                });
            }
            self.log.borrow_mut().devices.push(device.to_string());
            script.write(&format!("echo {device} {record}\n"))
        }

        fn close_script(&mut self, script: &mut ScriptFile) -> Result<()> {
            self.log.borrow_mut().closed += 1;
            script.close("")
        }
    }

    fn write_events(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("events.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_empty_document_produces_no_file_and_no_hook_calls() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(&temp_dir, "{}");
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator =
            ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
        generator.generate().unwrap();

        assert!(generator.script_file().as_os_str().is_empty());
        assert_eq!(log.borrow().opened, 0);
        assert_eq!(log.borrow().closed, 0);
        assert!(log.borrow().devices.is_empty());
    }

    #[test]
    fn test_object_payload_uses_bare_device_name() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(&temp_dir, r#"{"fanA": {"speed": 10}}"#);
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator =
            ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
        generator.generate().unwrap();

        assert_eq!(log.borrow().devices, ["fanA"]);
        assert_eq!(log.borrow().opened, 1);
        assert_eq!(log.borrow().closed, 1);
    }

    #[test]
    fn test_array_payload_appends_record_index() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(
            &temp_dir,
            r#"{"fanA": [{"speed": 10}, {"speed": 20}, {"speed": 30}]}"#,
        );
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator =
            ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
        generator.generate().unwrap();

        assert_eq!(log.borrow().devices, ["fanA0", "fanA1", "fanA2"]);
    }

    #[test]
    fn test_empty_array_payload_yields_no_records_but_frames_script() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(&temp_dir, r#"{"fanA": []}"#);
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator =
            ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
        generator.generate().unwrap();

        assert!(log.borrow().devices.is_empty());
        assert_eq!(log.borrow().opened, 1);
        assert_eq!(log.borrow().closed, 1);
    }

    #[test]
    fn test_devices_follow_document_order() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(
            &temp_dir,
            r#"{"zebra": {"a": 1}, "alpha": [{"b": 2}, {"b": 3}]}"#,
        );
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator =
            ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
        generator.generate().unwrap();

        assert_eq!(log.borrow().devices, ["zebra", "alpha0", "alpha1"]);
    }

    #[test]
    fn test_missing_input_surfaces_input_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let events = temp_dir.path().join("absent.json");
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator =
            ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
        let err = generator.generate().unwrap_err();

        assert!(matches!(err, InjectorError::InputNotFound { .. }));
        assert!(generator.script_file().as_os_str().is_empty());
        assert_eq!(log.borrow().opened, 0);
    }

    #[test]
    fn test_failing_hook_aborts_run_and_drop_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(
            &temp_dir,
            r#"{"fanA": [{"speed": 10}, {"speed": 20}], "fanB": {"speed": 30}}"#,
        );
        let log = Rc::new(RefCell::new(CallLog::default()));

        let mut generator = ScriptGenerator::new(
            &events,
            Box::new(RecordingFamily::failing_on(Rc::clone(&log), "fanA1")),
        );
        let err = generator.generate().unwrap_err();
        assert!(matches!(err, InjectorError::Write { .. }));

        // The run stopped at the failing record: fanB was never reached and
        // the script was never closed.
        assert_eq!(log.borrow().devices, ["fanA0"]);
        assert_eq!(log.borrow().closed, 0);

        let partial = generator.script_file().to_path_buf();
        assert!(partial.exists());
        drop(generator);
        assert!(!partial.exists());
    }

    #[test]
    fn test_script_persists_until_generator_drops() {
        let temp_dir = TempDir::new().unwrap();
        let events = write_events(&temp_dir, r#"{"fanA": {"speed": 10}}"#);
        let log = Rc::new(RefCell::new(CallLog::default()));

        let script_path;
        {
            let mut generator =
                ScriptGenerator::new(&events, Box::new(RecordingFamily::new(Rc::clone(&log))));
            generator.generate().unwrap();

            script_path = generator.script_file().to_path_buf();
            let content = fs::read_to_string(&script_path).unwrap();
            assert!(content.starts_with("#!/bin/bash\n"));
            assert!(content.contains("echo fanA"));
        }
        assert!(!script_path.exists());
    }
}
