use anyhow::Result;
use tokio::sync::mpsc;

use super::auth::AuthState;
use super::clipboard::ClipboardService;
use super::exporter::Exporter;
use super::progress::ProgressNarrator;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::GenerationRequest;
use crate::domain::models::RefinementPayload;
use crate::infrastructure::api::ApiManager;

async fn run_generation(
    revision: u64,
    request: GenerationRequest,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let narrator = ProgressNarrator::default();
    let guard = narrator.start(tx.clone());

    let res = ApiManager::codegen().generate(&request).await;
    guard.stop();

    match res {
        Ok(outcome) => {
            tx.send(Event::GenerationCompleted(revision, outcome))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "generation request failed");
            tx.send(Event::GenerationErrored(revision, err.to_string()))?;
        }
    }

    return Ok(());
}

async fn run_refinement(
    revision: u64,
    payload: RefinementPayload,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let narrator = ProgressNarrator::default();
    let guard = narrator.start(tx.clone());

    let res = ApiManager::codegen().refine(&payload).await;
    guard.stop();

    match res {
        Ok(outcome) => {
            tx.send(Event::RefinementCompleted(revision, outcome))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "refinement request failed");
            tx.send(Event::RefinementErrored(revision, err.to_string()))?;
        }
    }

    return Ok(());
}

async fn run_projects_list(tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let identity = match AuthState::require() {
        Ok(identity) => identity,
        Err(err) => {
            tx.send(Event::ProjectsErrored(err.to_string()))?;
            return Ok(());
        }
    };

    match ApiManager::projects().list(&identity.email).await {
        Ok(projects) => {
            tx.send(Event::ProjectsLoaded(projects))?;
        }
        Err(err) => {
            tx.send(Event::ProjectsErrored(err.to_string()))?;
        }
    }

    return Ok(());
}

async fn run_project_delete(generation_id: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    let identity = match AuthState::require() {
        Ok(identity) => identity,
        Err(err) => {
            tx.send(Event::ProjectActionErrored(err.to_string()))?;
            return Ok(());
        }
    };

    if let Err(err) = ApiManager::projects()
        .delete(&generation_id, &identity.email)
        .await
    {
        tx.send(Event::ProjectActionErrored(err.to_string()))?;
        return Ok(());
    }

    tx.send(Event::ProjectDeleted(generation_id))?;

    // The cached list is never trusted after a delete.
    return run_projects_list(tx).await;
}

async fn run_project_download(
    generation_id: String,
    filename: String,
    diagram: bool,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let store = ApiManager::projects();
    let res = if diagram {
        store.fetch_diagram(&generation_id).await
    } else {
        store.fetch_code(&generation_id).await
    };

    match res {
        Ok(bytes) => match Exporter::default().save(&filename, &bytes).await {
            Ok(path) => {
                tx.send(Event::StatusMessage(format!("Saved {}", path.display())))?;
            }
            Err(err) => {
                tx.send(Event::ProjectActionErrored(format!(
                    "Could not save {filename}: {err}"
                )))?;
            }
        },
        Err(err) => {
            tx.send(Event::ProjectActionErrored(err.to_string()))?;
        }
    }

    return Ok(());
}

async fn run_code_export(
    filename: String,
    code: String,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match Exporter::default().save(&filename, code.as_bytes()).await {
        Ok(path) => {
            tx.send(Event::StatusMessage(format!("Saved {}", path.display())))?;
        }
        Err(err) => {
            tx.send(Event::StatusMessage(format!(
                "Could not save {filename}: {err}"
            )))?;
        }
    }

    return Ok(());
}

fn copy_code(code: String, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    match ClipboardService::copy(code) {
        Ok(()) => {
            tx.send(Event::StatusMessage("Copied code to clipboard.".to_string()))?;
        }
        Err(err) => {
            tx.send(Event::StatusMessage(err.to_string()))?;
        }
    }

    return Ok(());
}

fn spawn_worker<F>(future: F)
where
    F: std::future::Future<Output = Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = future.await {
            tracing::error!(error = ?err, "worker failed");
        }
    });
}

pub struct ActionsService {}

impl ActionsService {
    /// Consumes actions from the UI and runs each one on its own worker so
    /// the render loop never waits on the network. Exclusivity of generation
    /// and refinement requests is enforced upstream by the session; project
    /// operations interleave freely.
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match action.unwrap() {
                Action::GenerationRequest(revision, request) => {
                    spawn_worker(async move {
                        return run_generation(revision, request, &worker_tx).await;
                    });
                }
                Action::RefinementRequest(revision, payload) => {
                    spawn_worker(async move {
                        return run_refinement(revision, payload, &worker_tx).await;
                    });
                }
                Action::ProjectsList() => {
                    spawn_worker(async move {
                        return run_projects_list(&worker_tx).await;
                    });
                }
                Action::ProjectDelete(generation_id) => {
                    spawn_worker(async move {
                        return run_project_delete(generation_id, &worker_tx).await;
                    });
                }
                Action::ProjectDownloadCode(generation_id, filename) => {
                    spawn_worker(async move {
                        return run_project_download(generation_id, filename, false, &worker_tx)
                            .await;
                    });
                }
                Action::ProjectDownloadDiagram(generation_id, filename) => {
                    spawn_worker(async move {
                        return run_project_download(generation_id, filename, true, &worker_tx)
                            .await;
                    });
                }
                Action::ExportCode(filename, code) => {
                    spawn_worker(async move {
                        return run_code_export(filename, code, &worker_tx).await;
                    });
                }
                Action::CopyCode(code) => {
                    copy_code(code, &tx)?;
                }
            }
        }
    }
}
