//! Job execution for the console
//!
//! A [`Job`] is one repository call described by a controller ticket. An
//! [`Executor`] runs jobs and hands back [`Outcome`]s; the console applies
//! outcomes in whatever order they arrive, relying on the tickets to drop
//! stale results.

use crate::api::{
    ApiResult, DownloadBundle, VersionDetail, VersionId, VersionPage, VersionRepository,
    Visualization,
};
use crate::draft::{DetailTicket, SaveRequest, SaveTicket, ValidateTicket};
use crate::list::PageTicket;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// A repository call to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    List(PageTicket),
    Detail(DetailTicket),
    Save(SaveTicket),
    Delete(VersionId),
    Validate(ValidateTicket),
    Download(VersionId),
}

/// The settled result of a [`Job`]
#[derive(Debug, Clone)]
pub enum Outcome {
    List(PageTicket, ApiResult<VersionPage>),
    Detail(DetailTicket, ApiResult<VersionDetail>),
    Save(SaveTicket, ApiResult<VersionDetail>),
    Delete(VersionId, ApiResult<()>),
    Validate(ValidateTicket, ApiResult<Visualization>),
    Download(VersionId, ApiResult<DownloadBundle>),
}

impl Job {
    /// Perform the call
    pub fn run(self, repo: &dyn VersionRepository) -> Outcome {
        match self {
            Self::List(ticket) => {
                let result = repo.list(ticket.page, &ticket.search);
                Outcome::List(ticket, result)
            }
            Self::Detail(ticket) => {
                let result = repo.get(ticket.id);
                Outcome::Detail(ticket, result)
            }
            Self::Save(ticket) => {
                let result = save(repo, &ticket.request);
                Outcome::Save(ticket, result)
            }
            Self::Delete(id) => Outcome::Delete(id, repo.delete(id)),
            Self::Validate(ticket) => {
                let result = repo.validate(&ticket.text);
                Outcome::Validate(ticket, result)
            }
            Self::Download(id) => Outcome::Download(id, repo.download(id)),
        }
    }
}

/// Send a save as create or update
///
/// # Errors
///
/// Returns the repository's `ApiError`.
pub fn save(repo: &dyn VersionRepository, request: &SaveRequest) -> ApiResult<VersionDetail> {
    match request {
        SaveRequest::Create(input) => repo.create(input),
        SaveRequest::Update(id, input) => repo.update(*id, input),
    }
}

/// Runs jobs against a repository
pub trait Executor: Send {
    /// Queue a job
    fn submit(&mut self, job: Job);

    /// Take every outcome that is ready, without blocking
    fn poll(&mut self) -> Vec<Outcome>;

    /// Number of submitted jobs whose outcome has not been polled yet
    fn pending(&self) -> usize;
}

/// Runs each job synchronously inside `submit`
pub struct InlineExecutor {
    repo: Arc<dyn VersionRepository>,
    ready: VecDeque<Outcome>,
}

impl InlineExecutor {
    #[must_use]
    pub fn new(repo: Arc<dyn VersionRepository>) -> Self {
        Self {
            repo,
            ready: VecDeque::new(),
        }
    }
}

impl Executor for InlineExecutor {
    fn submit(&mut self, job: Job) {
        let outcome = job.run(self.repo.as_ref());
        self.ready.push_back(outcome);
    }

    fn poll(&mut self) -> Vec<Outcome> {
        self.ready.drain(..).collect()
    }

    fn pending(&self) -> usize {
        self.ready.len()
    }
}

/// Runs jobs on a background worker thread
///
/// The worker processes jobs one at a time in submission order.
pub struct ThreadExecutor {
    jobs: Option<Sender<Job>>,
    outcomes: Receiver<Outcome>,
    in_flight: usize,
    worker: Option<JoinHandle<()>>,
}

impl ThreadExecutor {
    /// Spawn the worker
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn spawn(repo: Arc<dyn VersionRepository>) -> std::io::Result<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>();

        let worker = std::thread::Builder::new()
            .name("ontoctl-worker".into())
            .spawn(move || {
                for job in job_rx {
                    debug!(?job, "running job");
                    if outcome_tx.send(job.run(repo.as_ref())).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            outcomes: outcome_rx,
            in_flight: 0,
            worker: Some(worker),
        })
    }
}

impl Executor for ThreadExecutor {
    fn submit(&mut self, job: Job) {
        let Some(jobs) = &self.jobs else { return };
        if jobs.send(job).is_err() {
            warn!("worker thread is gone, dropping job");
            return;
        }
        self.in_flight += 1;
    }

    fn poll(&mut self) -> Vec<Outcome> {
        let mut ready = Vec::new();
        loop {
            match self.outcomes.try_recv() {
                Ok(outcome) => ready.push(outcome),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.in_flight = 0;
                    break;
                }
            }
        }
        self.in_flight = self.in_flight.saturating_sub(ready.len());
        ready
    }

    fn pending(&self) -> usize {
        self.in_flight
    }
}

impl Drop for ThreadExecutor {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemoryRepository, Operation};
    use std::time::{Duration, Instant};

    fn list_job(seq: u64) -> Job {
        Job::List(PageTicket {
            seq,
            page: 1,
            search: String::new(),
        })
    }

    #[test]
    fn test_inline_runs_on_submit() {
        let repo = Arc::new(MemoryRepository::new());
        let mut exec = InlineExecutor::new(repo.clone());
        exec.submit(list_job(1));
        assert_eq!(repo.call_count(Operation::List), 1);
        assert_eq!(exec.pending(), 1);

        let outcomes = exec.poll();
        assert!(matches!(outcomes.as_slice(), [Outcome::List(t, Ok(_))] if t.seq == 1));
        assert_eq!(exec.pending(), 0);
    }

    #[test]
    fn test_save_job_dispatches_by_request() {
        let repo = Arc::new(MemoryRepository::new());
        let id = repo.seed("a", "", "<rdf/>");
        let input = crate::api::VersionInput {
            name: "b".into(),
            description: String::new(),
            ontology_data: "<rdf/>".into(),
        };
        let outcome = Job::Save(SaveTicket {
            seq: 0,
            request: SaveRequest::Update(id, input),
        })
        .run(repo.as_ref());
        assert!(matches!(outcome, Outcome::Save(_, Ok(ref d)) if d.summary.name == "b"));
        assert_eq!(repo.call_count(Operation::Update), 1);
    }

    #[test]
    fn test_thread_executor_delivers_outcomes() {
        let repo = Arc::new(MemoryRepository::new());
        let mut exec = ThreadExecutor::spawn(repo).unwrap();
        exec.submit(list_job(1));
        exec.submit(list_job(2));
        assert_eq!(exec.pending(), 2);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = Vec::new();
        while seen.len() < 2 && Instant::now() < deadline {
            for outcome in exec.poll() {
                if let Outcome::List(ticket, _) = outcome {
                    seen.push(ticket.seq);
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(seen, vec![1, 2]);
        assert_eq!(exec.pending(), 0);
    }
}
