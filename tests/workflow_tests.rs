// End-to-end tests for the coordinator workflows: panel switching, new,
// load, load example, save, save as, close, and event propagation between
// the backend and the panels.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use rvtty::assets;
use rvtty::backend::{ExecutionBackend, ProcessorHandler, SystemIo};
use rvtty::panels::{CachePanel, EditorPanel, IoPanel, MemoryPanel, ProcessorPanel};
use rvtty::panels::processor::RunState;
use rvtty::session::coordinator::{ConfirmChoice, DialogService, Outcome, SessionCoordinator};
use rvtty::session::document::{LoadSource, SavePaths};
use rvtty::session::events::EventQueue;
use rvtty::session::panel::{
    EditableDocumentPanel, FileSource, LoadFileParams, PanelKind, SourceKind,
};
use rvtty::session::status::StatusChannel;

/// Dialog service driven by pre-scripted answers, recording what it was
/// asked so tests can assert on prompt counts and warnings.
#[derive(Default)]
struct ScriptedDialogs {
    confirm_answers: VecDeque<ConfirmChoice>,
    load_answers: VecDeque<Option<LoadFileParams>>,
    save_answers: VecDeque<Option<SavePaths>>,
    confirm_prompts: usize,
    save_prompts: usize,
    warnings: Vec<String>,
}

impl ScriptedDialogs {
    fn new() -> Self {
        Self::default()
    }

    fn confirm(mut self, choice: ConfirmChoice) -> Self {
        self.confirm_answers.push_back(choice);
        self
    }

    fn save_to(mut self, paths: Option<SavePaths>) -> Self {
        self.save_answers.push_back(paths);
        self
    }

    fn load(mut self, params: Option<LoadFileParams>) -> Self {
        self.load_answers.push_back(params);
        self
    }
}

impl DialogService for ScriptedDialogs {
    fn confirm_save(&mut self, _prompt: &str) -> ConfirmChoice {
        self.confirm_prompts += 1;
        self.confirm_answers
            .pop_front()
            .expect("unexpected confirm prompt")
    }

    fn load_file(&mut self) -> Option<LoadFileParams> {
        self.load_answers.pop_front().expect("unexpected load prompt")
    }

    fn save_paths(&mut self) -> Option<SavePaths> {
        self.save_prompts += 1;
        self.save_answers.pop_front().expect("unexpected save prompt")
    }

    fn warn(&mut self, _title: &str, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn settings(&mut self) {}
}

struct Session {
    coordinator: SessionCoordinator,
    editor: Rc<RefCell<EditorPanel>>,
    processor: Rc<RefCell<ProcessorPanel>>,
    cache: Rc<RefCell<CachePanel>>,
    memory: Rc<RefCell<MemoryPanel>>,
    io: Rc<RefCell<IoPanel>>,
    backend: Rc<RefCell<ProcessorHandler>>,
}

fn session() -> Session {
    let queue = EventQueue::new();
    let system_io = Rc::new(RefCell::new(SystemIo::new(queue.clone())));
    let editor = Rc::new(RefCell::new(EditorPanel::new(queue.clone())));
    let processor = Rc::new(RefCell::new(ProcessorPanel::new()));
    let cache = Rc::new(RefCell::new(CachePanel::new(queue.clone())));
    let memory = Rc::new(RefCell::new(MemoryPanel::new()));
    let io = Rc::new(RefCell::new(IoPanel::new()));
    let backend = Rc::new(RefCell::new(ProcessorHandler::new(
        queue.clone(),
        system_io.clone(),
    )));

    let coordinator = SessionCoordinator::new(
        editor.clone(),
        processor.clone(),
        cache.clone(),
        memory.clone(),
        io.clone(),
        backend.clone(),
        system_io,
        queue,
    )
    .expect("session construction failed");

    Session {
        coordinator,
        editor,
        processor,
        cache,
        memory,
        io,
        backend,
    }
}

fn type_text(s: &Session, text: &str) {
    let mut editor = s.editor.borrow_mut();
    for c in text.chars() {
        editor.insert_char(c);
    }
}

// === PANEL SWITCHING ===

#[test]
fn test_initial_panel_is_processor() {
    let s = session();
    assert_eq!(s.coordinator.current_panel(), Some(PanelKind::Processor));
    assert_eq!(s.coordinator.registry().visible_count(), 1);
}

#[test]
fn test_switch_panel_keeps_one_visible() {
    let mut s = session();
    s.coordinator
        .switch_panel(PanelKind::Editor)
        .expect("switch failed");
    assert_eq!(s.coordinator.current_panel(), Some(PanelKind::Editor));
    assert_eq!(s.coordinator.registry().visible_count(), 1);
    assert!(!s.coordinator.registry().is_visible(PanelKind::Processor));
}

#[test]
fn test_switching_to_editor_refreshes_exec_highlight() {
    let mut s = session();
    s.coordinator
        .switch_panel(PanelKind::Editor)
        .expect("switch failed");
    type_text(&s, "addi x1, x0, 1\n");
    s.coordinator.pump_events();

    s.coordinator
        .switch_panel(PanelKind::Memory)
        .expect("switch failed");
    s.coordinator
        .switch_panel(PanelKind::Editor)
        .expect("switch failed");
    assert_eq!(s.editor.borrow().exec_highlight(), Some(0));
}

// === NEW PROGRAM ===

#[test]
fn test_new_program_on_clean_empty_session_does_not_prompt() {
    let mut s = session();
    let mut dialogs = ScriptedDialogs::new();
    assert_eq!(s.coordinator.new_program(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.confirm_prompts, 0);
}

#[test]
fn test_new_program_discard_clears_editor_and_document() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();
    assert!(s.coordinator.document().is_dirty());

    let mut dialogs = ScriptedDialogs::new().confirm(ConfirmChoice::Discard);
    assert_eq!(s.coordinator.new_program(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.confirm_prompts, 1);

    assert!(!s.coordinator.document().is_dirty());
    assert!(!s.coordinator.document().has_location());
    assert!(s.editor.borrow().text().is_empty());
    // The backend received the now-empty program.
    assert!(s.backend.borrow().loaded_program().is_some());
    assert!(s.backend.borrow().loaded_program().is_some_and(|p| p.is_empty()));
}

#[test]
fn test_new_program_cancel_changes_nothing() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();
    let before = s.coordinator.document().clone();

    let mut dialogs = ScriptedDialogs::new().confirm(ConfirmChoice::Cancel);
    assert_eq!(s.coordinator.new_program(&mut dialogs), Outcome::Cancelled);
    assert_eq!(*s.coordinator.document(), before);
    assert_eq!(s.editor.borrow().text(), "li a0, 42\n");
}

#[test]
fn test_new_program_prompts_for_unsaved_never_saved_content() {
    // Clean but never saved: typed content would still be lost.
    let mut s = session();
    type_text(&s, "li a0, 1\n");
    s.coordinator.pump_events();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    assert!(!s.coordinator.document().is_dirty());

    let mut dialogs = ScriptedDialogs::new().confirm(ConfirmChoice::Discard);
    assert_eq!(s.coordinator.new_program(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.confirm_prompts, 1);
}

#[test]
fn test_new_program_rejected_nested_save_aborts() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new()
        .confirm(ConfirmChoice::Save)
        .save_to(None);
    assert_eq!(s.coordinator.new_program(&mut dialogs), Outcome::Cancelled);
    assert_eq!(s.editor.borrow().text(), "li a0, 42\n");
    assert!(s.coordinator.document().is_dirty());
}

// === LOADING ===

#[test]
fn test_load_example_assembly() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();

    assert_eq!(s.coordinator.load_example(fib, &mut dialogs), Outcome::Completed);

    let editor = s.editor.borrow();
    assert!(editor.text().contains("beqz"));
    assert!(editor.is_editor_enabled());
    assert_eq!(
        editor.exec_highlight(),
        Some(0),
        "a fresh load highlights the entry point"
    );
    drop(editor);

    let doc = s.coordinator.document();
    assert!(!doc.is_dirty());
    assert!(!doc.has_location(), "example loads never establish a location");
    assert_eq!(*doc.source(), LoadSource::ExampleAsset("fib.s".to_string()));

    // The program reached the backend through the change event.
    let backend = s.backend.borrow();
    let program = backend.loaded_program().expect("program not loaded");
    assert!(program.source.contains("beqz"));
}

#[test]
fn test_load_example_elf_shows_read_only_listing() {
    let mut s = session();
    let elf = assets::find("fib.elf").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();

    assert_eq!(s.coordinator.load_example(elf, &mut dialogs), Outcome::Completed);
    assert!(dialogs.warnings.is_empty());

    let editor = s.editor.borrow();
    assert!(!editor.is_editor_enabled(), "an ELF listing is not editable");
    assert_eq!(editor.binary_data().as_deref(), Some(elf.bytes));
    drop(editor);

    assert_eq!(
        *s.coordinator.document().source(),
        LoadSource::ExampleAsset("fib.elf".to_string())
    );
    assert!(!s.coordinator.document().has_location());
}

#[test]
fn test_load_program_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let path = dir.path().join("prog.s");
    std::fs::write(&path, "li a0, 7\necall\n").expect("write failed");

    let mut s = session();
    let mut dialogs = ScriptedDialogs::new().load(Some(LoadFileParams {
        source: FileSource::Disk(path.clone()),
        kind: SourceKind::Assembly,
    }));
    assert_eq!(s.coordinator.load_program(&mut dialogs), Outcome::Completed);

    assert_eq!(s.editor.borrow().text(), "li a0, 7\necall\n");
    assert_eq!(
        *s.coordinator.document().source(),
        LoadSource::UserFile(path)
    );
    assert!(!s.coordinator.document().has_location());
}

#[test]
fn test_load_program_cancelled_dialog() {
    let mut s = session();
    let mut dialogs = ScriptedDialogs::new().load(None);
    assert_eq!(s.coordinator.load_program(&mut dialogs), Outcome::Cancelled);
    assert!(s.editor.borrow().text().is_empty());
}

#[test]
fn test_failed_load_warns_and_mutates_nothing() {
    let mut s = session();
    type_text(&s, "existing content\n");
    s.coordinator.pump_events();
    let before = s.coordinator.document().clone();

    let mut dialogs = ScriptedDialogs::new().load(Some(LoadFileParams {
        source: FileSource::Disk(PathBuf::from("/nonexistent/prog.s")),
        kind: SourceKind::Assembly,
    }));
    assert_eq!(s.coordinator.load_program(&mut dialogs), Outcome::Cancelled);

    assert_eq!(dialogs.warnings.len(), 1);
    assert_eq!(*s.coordinator.document(), before);
    assert_eq!(s.editor.borrow().text(), "existing content\n");
}

#[test]
fn test_failed_elf_materialization_warns_and_mutates_nothing() {
    let mut s = session();
    type_text(&s, "existing content\n");
    s.coordinator.pump_events();
    let before = s.coordinator.document().clone();

    // Point the temp-file location at a directory that cannot exist so the
    // materialization step fails before the editor sees anything.
    let old_tmpdir = std::env::var_os("TMPDIR");
    std::env::set_var("TMPDIR", "/nonexistent/rvtty-tmp");
    let elf = assets::find("fib.elf").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    let outcome = s.coordinator.load_example(elf, &mut dialogs);
    match old_tmpdir {
        Some(v) => std::env::set_var("TMPDIR", v),
        None => std::env::remove_var("TMPDIR"),
    }

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(dialogs.warnings.len(), 1);
    assert_eq!(*s.coordinator.document(), before);
    assert_eq!(s.editor.borrow().text(), "existing content\n");
    assert!(s.editor.borrow().is_editor_enabled());
}

#[test]
fn test_load_program_pauses_running_execution() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    s.backend.borrow_mut().run();
    assert!(s.backend.borrow().is_running());

    let mut dialogs = ScriptedDialogs::new().load(None);
    s.coordinator.load_program(&mut dialogs);
    assert!(!s.backend.borrow().is_running());
    s.coordinator.pump_events();

    assert_eq!(s.processor.borrow().run_state(), RunState::Paused);
    let pauses = s
        .processor
        .borrow()
        .log()
        .iter()
        .filter(|l| l.contains("execution paused"))
        .count();
    assert_eq!(pauses, 1, "pause must be logged exactly once");
}

#[test]
fn test_load_program_on_idle_backend_logs_no_pause() {
    let mut s = session();
    let mut dialogs = ScriptedDialogs::new().load(None);
    s.coordinator.load_program(&mut dialogs);
    s.coordinator.pump_events();

    assert_eq!(s.processor.borrow().run_state(), RunState::Idle);
    assert!(s.processor.borrow().log().is_empty());
}

// === SAVING ===

#[test]
fn test_save_prompts_once_then_saves_silently() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let out = dir.path().join("prog.s");

    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new().save_to(Some(SavePaths {
        assembly: Some(out.clone()),
        binary: None,
    }));
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.save_prompts, 1);

    let written = std::fs::read_to_string(&out).expect("read failed");
    assert_eq!(written, "li a0, 42\n");
    assert!(!s.coordinator.document().is_dirty());
    assert!(s.coordinator.document().has_location());
    assert!(s.coordinator.document().can_save_quickly());

    // Edit again and save: no prompt this time, same destination.
    type_text(&s, "ecall\n");
    s.coordinator.pump_events();
    assert!(s.coordinator.document().is_dirty());

    let mut dialogs = ScriptedDialogs::new();
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.save_prompts, 0, "quick save must not prompt");

    let written = std::fs::read_to_string(&out).expect("read failed");
    assert_eq!(written, "li a0, 42\necall\n");
    assert!(!s.coordinator.document().is_dirty());
}

#[test]
fn test_save_twice_without_edits_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let out = dir.path().join("prog.s");

    let mut s = session();
    type_text(&s, "li a0, 42\necall\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new().save_to(Some(SavePaths {
        assembly: Some(out.clone()),
        binary: None,
    }));
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Completed);
    let first = std::fs::read(&out).expect("read failed");

    // Clean state with a location: saving again overwrites in place with
    // no prompt and produces the same bytes.
    let mut dialogs = ScriptedDialogs::new();
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.save_prompts, 0);
    let second = std::fs::read(&out).expect("read failed");
    assert_eq!(first, second);
    assert!(!s.coordinator.document().is_dirty());
}

#[test]
fn test_save_cancelled_keeps_dirty_state() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new().save_to(None);
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Cancelled);
    assert!(s.coordinator.document().is_dirty());
    assert!(!s.coordinator.document().has_location());
}

#[test]
fn test_save_as_always_prompts() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let first = dir.path().join("a.s");
    let second = dir.path().join("b.s");

    let mut s = session();
    type_text(&s, "nop\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new().save_to(Some(SavePaths {
        assembly: Some(first.clone()),
        binary: None,
    }));
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Completed);

    let mut dialogs = ScriptedDialogs::new().save_to(Some(SavePaths {
        assembly: Some(second.clone()),
        binary: None,
    }));
    assert_eq!(s.coordinator.save_as(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.save_prompts, 1);
    assert!(second.exists());

    // Subsequent quick saves go to the new destination.
    assert_eq!(
        s.coordinator.document().save_paths().assembly.as_deref(),
        Some(second.as_path())
    );
}

#[test]
fn test_save_writes_binary_artifact_for_elf() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let out = dir.path().join("prog.bin");

    let mut s = session();
    let elf = assets::find("fib.elf").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(elf, &mut dialogs);

    let mut dialogs = ScriptedDialogs::new().save_to(Some(SavePaths {
        assembly: None,
        binary: Some(out.clone()),
    }));
    assert_eq!(s.coordinator.save(&mut dialogs), Outcome::Completed);

    let written = std::fs::read(&out).expect("read failed");
    assert_eq!(written, elf.bytes);
}

// === CLOSING ===

#[test]
fn test_close_with_empty_editor_does_not_prompt() {
    let mut s = session();
    let mut dialogs = ScriptedDialogs::new();
    assert_eq!(s.coordinator.close(&mut dialogs), Outcome::Completed);
    assert_eq!(dialogs.confirm_prompts, 0);
    assert!(s.coordinator.shutdown_signal().get());
}

#[test]
fn test_close_cancel_vetoes_and_rolls_back() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();
    let before = s.coordinator.document().clone();

    let mut dialogs = ScriptedDialogs::new().confirm(ConfirmChoice::Cancel);
    assert_eq!(s.coordinator.close(&mut dialogs), Outcome::Cancelled);

    assert!(!s.coordinator.shutdown_signal().get());
    assert_eq!(*s.coordinator.document(), before);
    assert_eq!(s.editor.borrow().text(), "li a0, 42\n");
}

#[test]
fn test_close_discard_completes_without_saving() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new().confirm(ConfirmChoice::Discard);
    assert_eq!(s.coordinator.close(&mut dialogs), Outcome::Completed);
    assert!(s.coordinator.shutdown_signal().get());
    assert_eq!(dialogs.save_prompts, 0);
}

#[test]
fn test_close_save_writes_then_completes() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let out = dir.path().join("prog.s");

    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new()
        .confirm(ConfirmChoice::Save)
        .save_to(Some(SavePaths {
            assembly: Some(out.clone()),
            binary: None,
        }));
    assert_eq!(s.coordinator.close(&mut dialogs), Outcome::Completed);
    assert!(out.exists());
}

#[test]
fn test_close_with_rejected_nested_save_is_vetoed() {
    let mut s = session();
    type_text(&s, "li a0, 42\n");
    s.coordinator.pump_events();

    let mut dialogs = ScriptedDialogs::new()
        .confirm(ConfirmChoice::Save)
        .save_to(None);
    assert_eq!(s.coordinator.close(&mut dialogs), Outcome::Cancelled);
    assert!(!s.coordinator.shutdown_signal().get());
    assert!(s.coordinator.document().is_dirty());
}

// === EVENT PROPAGATION ===

#[test]
fn test_run_to_completion_updates_panels_and_status() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    s.coordinator.pump_events();

    s.backend.borrow_mut().run();
    s.backend.borrow_mut().run_to_completion();
    s.coordinator.pump_events();

    assert_eq!(s.processor.borrow().run_state(), RunState::Finished);
    assert!(s
        .processor
        .borrow()
        .log()
        .iter()
        .any(|l| l.contains("program exited with code 0")));
    assert!(s
        .io
        .borrow()
        .lines()
        .iter()
        .any(|l| l.contains("program exited with code 0")));

    let status = s.coordinator.status();
    assert_eq!(status.text(StatusChannel::Processor), "execution finished");
    assert_eq!(status.text(StatusChannel::Syscall), "ecall 93 (exit)");
    assert!(status
        .text(StatusChannel::SystemIo)
        .contains("program exited"));
}

#[test]
fn test_pause_midway_flows_to_processor_panel() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    s.coordinator.pump_events();

    s.backend.borrow_mut().run();
    s.backend.borrow_mut().tick();
    s.backend.borrow_mut().pause();
    s.coordinator.pump_events();

    assert_eq!(s.processor.borrow().run_state(), RunState::Paused);
    assert_eq!(s.coordinator.status().text(StatusChannel::Processor), "paused");
}

#[test]
fn test_reset_clears_status_and_io_panel() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    s.backend.borrow_mut().run();
    s.backend.borrow_mut().run_to_completion();
    s.coordinator.pump_events();
    assert!(!s.io.borrow().lines().is_empty());

    s.backend.borrow_mut().reset();
    s.coordinator.pump_events();

    assert!(s.io.borrow().lines().is_empty());
    for channel in StatusChannel::ALL {
        assert_eq!(s.coordinator.status().text(channel), "");
    }
}

#[test]
fn test_cache_focus_recenters_memory_panel() {
    let mut s = session();
    s.cache.borrow_mut().set_focus(0x1_2345);
    s.coordinator.pump_events();
    // Focus is aligned down to the cache line before propagating.
    assert_eq!(s.memory.borrow().central_address(), 0x1_2340);
}

#[test]
fn test_processor_change_refreshes_editor_highlight() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    s.coordinator.pump_events();
    assert_eq!(s.editor.borrow().exec_highlight(), Some(0));

    s.backend.borrow_mut().select_processor("RV32 single-cycle");
    s.coordinator.pump_events();
    assert_eq!(s.editor.borrow().exec_highlight(), Some(0));
    assert_eq!(s.backend.borrow().processor_name(), "RV32 single-cycle");
}

#[test]
fn test_events_queued_during_modal_are_drained_in_order() {
    let mut s = session();
    let fib = assets::find("fib.s").expect("asset missing");
    let mut dialogs = ScriptedDialogs::new();
    s.coordinator.load_example(fib, &mut dialogs);
    s.coordinator.pump_events();

    // Output produced while no pump runs (a modal would be open) waits in
    // the queue and arrives in emission order afterwards.
    s.backend.borrow_mut().run();
    s.backend.borrow_mut().run_to_completion();
    assert!(s.coordinator.has_pending_events());
    assert!(s.io.borrow().lines().is_empty());

    let handled = s.coordinator.pump_events();
    assert!(handled >= 3);
    assert!(!s.coordinator.has_pending_events());
    assert!(!s.io.borrow().lines().is_empty());
}
