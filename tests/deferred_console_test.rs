//! Console tests with calls held in flight
//!
//! The executor here queues every job until the test releases it, so user
//! actions can be interleaved with outstanding calls and responses can be
//! delivered out of order.

use ontoctl::api::{Call, MemoryRepository, Operation, VersionRepository};
use ontoctl::console::{Console, Executor, Job, Outcome, notifying};
use ontoctl::draft::{DraftError, DraftState};
use ontoctl::notify::RecordingNotifier;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

const PIZZA: &str = r#"<owl:Class rdf:about="http://x#Pizza"/>"#;

#[derive(Default)]
struct Queue {
    held: VecDeque<Job>,
    ready: Vec<Outcome>,
}

/// Executor that holds jobs until they are released through a [`Gate`]
struct HeldExecutor {
    queue: Arc<Mutex<Queue>>,
}

impl Executor for HeldExecutor {
    fn submit(&mut self, job: Job) {
        self.queue.lock().unwrap().held.push_back(job);
    }

    fn poll(&mut self) -> Vec<Outcome> {
        std::mem::take(&mut self.queue.lock().unwrap().ready)
    }

    fn pending(&self) -> usize {
        let queue = self.queue.lock().unwrap();
        queue.held.len() + queue.ready.len()
    }
}

/// Test-side handle that runs held jobs
struct Gate {
    repo: Arc<dyn VersionRepository>,
    queue: Arc<Mutex<Queue>>,
}

impl Gate {
    fn held(&self) -> Vec<Job> {
        self.queue.lock().unwrap().held.iter().cloned().collect()
    }

    fn release_at(&self, index: usize) -> bool {
        let job = self.queue.lock().unwrap().held.remove(index);
        let Some(job) = job else { return false };
        let outcome = job.run(self.repo.as_ref());
        self.queue.lock().unwrap().ready.push(outcome);
        true
    }

    fn release_next(&self) -> bool {
        self.release_at(0)
    }

    fn release_last(&self) -> bool {
        let len = self.queue.lock().unwrap().held.len();
        len > 0 && self.release_at(len - 1)
    }

    /// Run jobs until nothing is held, applying each outcome as it lands
    fn settle(&self, console: &mut Console) {
        while self.release_next() {
            console.pump();
        }
    }
}

fn setup(repo: MemoryRepository) -> (Console, Gate, Arc<MemoryRepository>, Arc<RecordingNotifier>) {
    let repo = Arc::new(repo);
    let recorder = Arc::new(RecordingNotifier::new());
    let wrapped = notifying(repo.clone(), recorder.clone());
    let queue = Arc::new(Mutex::new(Queue::default()));
    let console = Console::new(
        Box::new(HeldExecutor {
            queue: queue.clone(),
        }),
        recorder.clone(),
    );
    let gate = Gate {
        repo: wrapped,
        queue,
    };
    (console, gate, repo, recorder)
}

/// Start and deliver the first page, leaving the detail fetch held
fn start_with_detail_held(console: &mut Console, gate: &Gate) {
    console.start();
    assert!(gate.release_next());
    console.pump();
    assert!(matches!(gate.held().as_slice(), [Job::Detail(_)]));
}

fn names(console: &Console) -> Vec<String> {
    console
        .list()
        .items()
        .iter()
        .map(|v| v.name.clone())
        .collect()
}

#[test]
fn test_typing_during_detail_load_is_refused_not_lost() {
    let repo = MemoryRepository::new();
    let id = repo.seed("pizza", "", PIZZA);
    let (mut console, gate, _, _) = setup(repo);
    start_with_detail_held(&mut console, &gate);

    console.edit();
    assert_eq!(console.alert(), Some(DraftError::Loading.to_string().as_str()));
    console.dismiss_alert();
    console.set_text("<mine/>");
    assert!(console.alert().is_some());
    assert_eq!(console.drafts().draft().state(), DraftState::Viewing);

    gate.settle(&mut console);
    assert_eq!(console.drafts().draft().id(), Some(id));
    assert_eq!(console.drafts().draft().ontology_data, PIZZA);

    console.dismiss_alert();
    console.edit();
    console.set_text("<mine/>");
    assert!(console.alert().is_none());
    assert_eq!(console.drafts().draft().ontology_data, "<mine/>");
}

#[test]
fn test_save_during_detail_load_sends_nothing() {
    let repo = MemoryRepository::new();
    let id = repo.seed("pizza", "", PIZZA);
    let (mut console, gate, repo, _) = setup(repo);
    start_with_detail_held(&mut console, &gate);

    console.set_name("renamed");
    console.save();
    assert!(!console.drafts().is_saving());
    assert!(matches!(gate.held().as_slice(), [Job::Detail(_)]));

    gate.settle(&mut console);
    assert_eq!(repo.call_count(Operation::Update), 0);
    assert_eq!(repo.get(id).unwrap().ontology_data, PIZZA);
    assert_eq!(console.drafts().draft().name, "pizza");
}

#[test]
fn test_edit_version_opens_once_detail_lands() {
    let repo = MemoryRepository::new();
    repo.seed("pizza", "", PIZZA);
    let (mut console, gate, _, _) = setup(repo);
    console.start();
    gate.settle(&mut console);

    let summary = console.list().items()[0].clone();
    console.edit_version(summary);
    assert_eq!(console.drafts().draft().state(), DraftState::Viewing);
    assert!(console.drafts().is_loading());

    gate.settle(&mut console);
    let draft = console.drafts().draft();
    assert_eq!(draft.state(), DraftState::Editing);
    assert_eq!(draft.ontology_data, PIZZA);
}

#[test]
fn test_page_for_previous_search_is_dropped() {
    let repo = MemoryRepository::new();
    repo.seed("pizza", "", PIZZA);
    repo.seed("wine", "", PIZZA);
    let (mut console, gate, _, _) = setup(repo);

    console.start();
    console.search("wine");
    assert_eq!(gate.held().len(), 2);

    // Newer search answers first, the original load arrives late
    assert!(gate.release_last());
    console.pump();
    assert_eq!(names(&console), vec!["wine"]);
    assert!(gate.release_at(0));
    console.pump();
    assert_eq!(names(&console), vec!["wine"]);
    assert_eq!(console.list().search(), "wine");

    gate.settle(&mut console);
    assert_eq!(console.drafts().draft().name, "wine");
}

#[test]
fn test_validation_for_previous_selection_is_dropped() {
    let repo = MemoryRepository::new();
    let older = repo.seed("older", "", r#"<owl:Class rdf:about="http://x#Wine"/>"#);
    repo.seed("pizza", "", PIZZA);
    let (mut console, gate, repo, _) = setup(repo);
    console.start();
    gate.settle(&mut console);

    console.edit();
    console.validate();
    assert!(console.drafts().is_validating());
    console.select_id(older);

    gate.settle(&mut console);
    assert_eq!(repo.call_count(Operation::Validate), 1);
    let draft = console.drafts().draft();
    assert_eq!(draft.id(), Some(older));
    assert!(draft.visualization().is_none());
    assert!(!console.drafts().is_validating());
}

#[test]
fn test_detail_for_previous_selection_is_dropped() {
    let repo = MemoryRepository::new();
    let older = repo.seed("older", "", "<older/>");
    repo.seed("newer", "", "<newer/>");
    let (mut console, gate, _, _) = setup(repo);
    start_with_detail_held(&mut console, &gate);

    console.select_id(older);
    assert_eq!(gate.held().len(), 2);
    assert!(gate.release_last());
    console.pump();
    assert_eq!(console.drafts().draft().ontology_data, "<older/>");

    gate.settle(&mut console);
    assert_eq!(console.drafts().draft().id(), Some(older));
    assert_eq!(console.drafts().draft().ontology_data, "<older/>");
}

#[test]
fn test_second_save_while_pending_is_refused() {
    let (mut console, gate, repo, recorder) = setup(MemoryRepository::new());
    console.start();
    gate.settle(&mut console);

    console.set_name("v1");
    console.set_text(PIZZA);
    console.save();
    console.save();
    assert_eq!(console.alert(), Some(DraftError::SaveInFlight.to_string().as_str()));

    gate.settle(&mut console);
    assert_eq!(repo.call_count(Operation::Create), 1);
    assert_eq!(recorder.success_count(), 1);
    assert_eq!(names(&console), vec!["v1"]);
    assert!(!console.is_busy());
}

#[test]
fn test_second_delete_while_pending_is_refused() {
    let repo = MemoryRepository::new();
    let id = repo.seed("pizza", "", PIZZA);
    let (mut console, gate, repo, _) = setup(repo);
    console.start();
    gate.settle(&mut console);

    console.request_delete_current();
    console.confirm_delete();
    console.request_delete_current();
    assert_eq!(console.alert(), Some(DraftError::DeleteInFlight.to_string().as_str()));
    assert!(console.pending_delete().is_none());

    gate.settle(&mut console);
    assert_eq!(repo.calls().iter().filter(|c| **c == Call::Delete(id)).count(), 1);
    assert!(console.list().items().is_empty());
}
