//! Background engine for bulk copy/move/delete.
//!
//! [`execute`] is the synchronous engine; [`FileOperationExecutor`] runs it
//! on tokio's blocking pool and reports through an unbounded mpsc channel,
//! so the caller never waits on filesystem I/O.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::TargetError;
use crate::fs::FileSystem;
use crate::ops::request::{
    OperationKind, OperationReport, OperationRequest, OperationResult, RequestId, TargetFailure,
};

/// Creates the channel executor reports are delivered on.
pub fn report_channel() -> (
    UnboundedSender<OperationReport>,
    UnboundedReceiver<OperationReport>,
) {
    mpsc::unbounded_channel()
}

/// Submits requests to background workers. Holds no per-request state.
#[derive(Clone)]
pub struct FileOperationExecutor {
    fs: Arc<dyn FileSystem>,
    runtime: Handle,
    reports: UnboundedSender<OperationReport>,
}

impl FileOperationExecutor {
    /// Creates an executor that spawns work on `runtime` and sends every
    /// completion to `reports`.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        runtime: Handle,
        reports: UnboundedSender<OperationReport>,
    ) -> Self {
        Self {
            fs,
            runtime,
            reports,
        }
    }

    /// Starts `request` in the background and returns immediately.
    ///
    /// Exactly one [`OperationReport`] carrying the request's id is sent
    /// when all targets have been processed. If the receiving side has been
    /// dropped the report is discarded.
    pub fn submit(&self, request: OperationRequest) -> RequestId {
        let id = request.id();
        let fs = Arc::clone(&self.fs);
        let reports = self.reports.clone();
        tracing::debug!(
            "dispatching {} {id} ({} target(s))",
            request.kind(),
            request.targets().len()
        );

        self.runtime.spawn_blocking(move || {
            let result = execute(fs.as_ref(), &request);
            tracing::info!(
                "{} {id} finished: {} ({} ok, {} failed)",
                request.kind(),
                result.outcome(),
                result.succeeded().len(),
                result.failed().len()
            );
            let report = OperationReport {
                id,
                kind: request.kind(),
                result,
            };
            if reports.send(report).is_err() {
                tracing::warn!("report for {id} dropped: receiver closed");
            }
        });
        id
    }
}

/// Runs `request` to completion against `fs`.
///
/// Every target is processed independently: a failing target is recorded
/// and the batch carries on.
pub fn execute(fs: &dyn FileSystem, request: &OperationRequest) -> OperationResult {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for target in request.targets() {
        let outcome = match request.kind() {
            OperationKind::Delete => fs.remove(target),
            OperationKind::Copy | OperationKind::Move => {
                transfer(fs, request.kind(), target, request.destination())
            }
        };
        match outcome {
            Ok(()) => succeeded.push(target.clone()),
            Err(error) => {
                tracing::warn!("{} of {} failed: {error}", request.kind(), target.display());
                failed.push(TargetFailure {
                    path: target.clone(),
                    error,
                });
            }
        }
    }

    OperationResult::from_parts(succeeded, failed)
}

fn transfer(
    fs: &dyn FileSystem,
    kind: OperationKind,
    src: &Path,
    destination: Option<&Path>,
) -> Result<(), TargetError> {
    let dest_dir = match destination {
        Some(dir) if fs.is_dir(dir) => dir,
        _ => return Err(TargetError::InvalidDestination),
    };
    if !fs.exists(src) {
        return Err(TargetError::SourceNotFound);
    }
    let name = src
        .file_name()
        .ok_or_else(|| TargetError::Io(format!("{} has no file name", src.display())))?;
    let dest = dest_dir.join(name);

    if fs.exists(&dest) {
        return Err(TargetError::Collision);
    }
    if fs.is_dir(src) && dest_dir.starts_with(src) {
        return Err(TargetError::DestinationInsideSource);
    }

    match kind {
        OperationKind::Move => move_entry(fs, src, &dest),
        _ => fs.copy(src, &dest),
    }
}

fn move_entry(fs: &dyn FileSystem, src: &Path, dest: &Path) -> Result<(), TargetError> {
    let rename_err = match fs.rename(src, dest) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    tracing::debug!(
        "rename {} -> {} failed ({rename_err}), falling back to copy",
        src.display(),
        dest.display()
    );

    fs.copy(src, dest)?;
    if let Err(e) = fs.verify_copy(src, dest) {
        if let Err(cleanup) = fs.remove(dest) {
            tracing::warn!("failed to remove unverified copy {}: {cleanup}", dest.display());
        }
        return Err(e);
    }
    fs.remove(src)
        .map_err(|e| TargetError::SourceRemovalFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreResult;
    use crate::fs::entry::DirectoryEntry;
    use crate::fs::LocalFs;
    use crate::ops::request::Outcome;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Local disk where rename always fails as if crossing devices, and
    /// removal of paths under `protected` fails.
    struct CrossDeviceFs {
        protected: Option<PathBuf>,
    }

    impl FileSystem for CrossDeviceFs {
        fn list(&self, dir: &Path) -> CoreResult<Vec<DirectoryEntry>> {
            LocalFs.list(dir)
        }
        fn canonicalize(&self, path: &Path) -> CoreResult<PathBuf> {
            LocalFs.canonicalize(path)
        }
        fn exists(&self, path: &Path) -> bool {
            LocalFs.exists(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            LocalFs.is_dir(path)
        }
        fn rename(&self, _src: &Path, _dest: &Path) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "cross-device link",
            ))
        }
        fn copy(&self, src: &Path, dest: &Path) -> Result<(), TargetError> {
            LocalFs.copy(src, dest)
        }
        fn verify_copy(&self, src: &Path, dest: &Path) -> Result<(), TargetError> {
            LocalFs.verify_copy(src, dest)
        }
        fn remove(&self, path: &Path) -> Result<(), TargetError> {
            match &self.protected {
                Some(p) if path.starts_with(p) => {
                    Err(TargetError::Io("device or resource busy".to_string()))
                }
                _ => LocalFs.remove(path),
            }
        }
    }

    struct Fixture {
        _tmp: TempDir,
        src: PathBuf,
        dest: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("dest");
        fs::create_dir(&src).unwrap();
        fs::create_dir(&dest).unwrap();
        Fixture {
            _tmp: tmp,
            src,
            dest,
        }
    }

    fn id() -> RequestId {
        RequestId::new(1)
    }

    #[test]
    fn copy_isolates_collision() {
        let fx = fixture();
        let f1 = fx.src.join("f1.txt");
        let f2 = fx.src.join("f2.txt");
        let f3 = fx.src.join("f3.txt");
        for f in [&f1, &f2, &f3] {
            fs::write(f, "payload").unwrap();
        }
        fs::write(fx.dest.join("f2.txt"), "already here").unwrap();

        let request =
            OperationRequest::copy(id(), vec![f1.clone(), f2.clone(), f3.clone()], fx.dest.clone());
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::PartialFailure);
        assert_eq!(
            result.failed(),
            &[TargetFailure {
                path: f2,
                error: TargetError::Collision
            }]
        );
        assert_eq!(result.succeeded(), &[f1, f3]);
        assert!(fx.dest.join("f1.txt").exists());
        assert!(fx.dest.join("f3.txt").exists());
        assert_eq!(
            fs::read_to_string(fx.dest.join("f2.txt")).unwrap(),
            "already here"
        );
    }

    #[test]
    fn copy_directory_keeps_structure() {
        let fx = fixture();
        let album = fx.src.join("album");
        fs::create_dir_all(album.join("2024")).unwrap();
        fs::write(album.join("cover.jpg"), "img").unwrap();
        fs::write(album.join("2024").join("track.mp3"), "snd").unwrap();

        let request = OperationRequest::copy(id(), vec![album.clone()], fx.dest.clone());
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::Success);
        assert!(fx.dest.join("album").join("cover.jpg").exists());
        assert!(fx.dest.join("album").join("2024").join("track.mp3").exists());
        assert!(album.exists());
    }

    #[test]
    fn copy_into_own_subdirectory_fails_that_target() {
        let fx = fixture();
        let dir = fx.src.join("dir");
        fs::create_dir_all(dir.join("inner")).unwrap();

        let request = OperationRequest::copy(id(), vec![dir.clone()], dir.join("inner"));
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::Failure);
        assert_eq!(result.failed()[0].error, TargetError::DestinationInsideSource);
    }

    #[test]
    fn copy_to_missing_destination_fails_every_target() {
        let fx = fixture();
        let a = fx.src.join("a");
        fs::write(&a, "").unwrap();

        let request = OperationRequest::copy(id(), vec![a], fx.dest.join("missing"));
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::Failure);
        assert_eq!(result.failed()[0].error, TargetError::InvalidDestination);
    }

    #[test]
    fn missing_source_is_reported_not_fatal() {
        let fx = fixture();
        let real = fx.src.join("real.txt");
        fs::write(&real, "x").unwrap();

        let request = OperationRequest::copy(
            id(),
            vec![fx.src.join("ghost.txt"), real.clone()],
            fx.dest.clone(),
        );
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::PartialFailure);
        assert_eq!(result.failed()[0].error, TargetError::SourceNotFound);
        assert_eq!(result.succeeded(), &[real]);
    }

    #[test]
    fn move_renames_on_same_filesystem() {
        let fx = fixture();
        let doc = fx.src.join("doc.md");
        fs::write(&doc, "# hi").unwrap();

        let request = OperationRequest::move_to(id(), vec![doc.clone()], fx.dest.clone());
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::Success);
        assert!(!doc.exists());
        assert_eq!(fs::read_to_string(fx.dest.join("doc.md")).unwrap(), "# hi");
    }

    #[test]
    fn move_does_not_overwrite() {
        let fx = fixture();
        let doc = fx.src.join("doc.md");
        fs::write(&doc, "new").unwrap();
        fs::write(fx.dest.join("doc.md"), "old").unwrap();

        let request = OperationRequest::move_to(id(), vec![doc.clone()], fx.dest.clone());
        let result = execute(&LocalFs, &request);

        assert_eq!(result.failed()[0].error, TargetError::Collision);
        assert!(doc.exists());
        assert_eq!(fs::read_to_string(fx.dest.join("doc.md")).unwrap(), "old");
    }

    #[test]
    fn move_falls_back_to_copy_and_remove() {
        let fx = fixture();
        let dir = fx.src.join("project");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("main.rs"), "fn main() {}").unwrap();
        let cross = CrossDeviceFs { protected: None };

        let request = OperationRequest::move_to(id(), vec![dir.clone()], fx.dest.clone());
        let result = execute(&cross, &request);

        assert_eq!(result.outcome(), Outcome::Success);
        assert!(!dir.exists());
        assert_eq!(
            fs::read_to_string(fx.dest.join("project").join("main.rs")).unwrap(),
            "fn main() {}"
        );
    }

    #[test]
    fn move_fallback_reports_failed_source_removal() {
        let fx = fixture();
        let keep = fx.src.join("keep.bin");
        let other = fx.src.join("other.bin");
        fs::write(&keep, "1234").unwrap();
        fs::write(&other, "5678").unwrap();
        let cross = CrossDeviceFs {
            protected: Some(keep.clone()),
        };

        let request =
            OperationRequest::move_to(id(), vec![keep.clone(), other.clone()], fx.dest.clone());
        let result = execute(&cross, &request);

        assert_eq!(result.outcome(), Outcome::PartialFailure);
        assert_eq!(result.failed().len(), 1);
        assert_eq!(result.failed()[0].path, keep);
        assert!(matches!(
            result.failed()[0].error,
            TargetError::SourceRemovalFailed(_)
        ));
        assert!(keep.exists());
        assert!(fx.dest.join("keep.bin").exists());
        assert!(!other.exists());
        assert!(fx.dest.join("other.bin").exists());
    }

    #[test]
    fn delete_continues_past_failures() {
        let fx = fixture();
        let a = fx.src.join("a.txt");
        let dir = fx.src.join("dir");
        fs::write(&a, "").unwrap();
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("n.txt"), "").unwrap();

        let request = OperationRequest::delete(
            id(),
            vec![fx.src.join("missing"), a.clone(), dir.clone()],
        );
        let result = execute(&LocalFs, &request);

        assert_eq!(result.outcome(), Outcome::PartialFailure);
        assert_eq!(result.failed().len(), 1);
        assert_eq!(result.failed()[0].error, TargetError::SourceNotFound);
        assert!(!a.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn empty_request_succeeds() {
        let request = OperationRequest::delete(id(), vec![]);
        assert_eq!(execute(&LocalFs, &request).outcome(), Outcome::Success);
    }

    #[tokio::test]
    async fn submit_reports_on_channel() {
        let fx = fixture();
        let a = fx.src.join("a.txt");
        fs::write(&a, "data").unwrap();
        let (tx, mut rx) = report_channel();
        let executor = FileOperationExecutor::new(Arc::new(LocalFs), Handle::current(), tx);

        let id = executor.submit(OperationRequest::copy(
            RequestId::new(42),
            vec![a],
            fx.dest.clone(),
        ));
        let report = rx.recv().await.unwrap();

        assert_eq!(id, RequestId::new(42));
        assert_eq!(report.id, id);
        assert_eq!(report.kind, OperationKind::Copy);
        assert_eq!(report.result.outcome(), Outcome::Success);
        assert!(fx.dest.join("a.txt").exists());
    }

    #[tokio::test]
    async fn submit_keeps_requests_apart() {
        let fx = fixture();
        let a = fx.src.join("a.txt");
        let b = fx.src.join("b.txt");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();
        let (tx, mut rx) = report_channel();
        let executor = FileOperationExecutor::new(Arc::new(LocalFs), Handle::current(), tx);

        executor.submit(OperationRequest::delete(RequestId::new(1), vec![a]));
        executor.submit(OperationRequest::copy(RequestId::new(2), vec![b], fx.dest.clone()));

        let mut ids = vec![rx.recv().await.unwrap().id, rx.recv().await.unwrap().id];
        ids.sort();
        assert_eq!(ids, vec![RequestId::new(1), RequestId::new(2)]);
    }
}
