use crate::{Engine, EngineConfig, Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Goto(String, oneshot::Sender<Result<()>>),
    Eval(String, oneshot::Sender<Result<serde_json::Value>>),
    Screenshot(Option<PathBuf>, oneshot::Sender<Result<Vec<u8>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly browser session backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous [`Engine`] instance and executes
/// commands sent from async tasks so callers can use an async interface
/// without requiring the engine to be `Send` across threads.
///
/// The session is released on every exit path: [`Browser::close`] shuts the
/// engine down explicitly, and dropping the last handle (including every
/// [`Page`]) disconnects the channel, which ends the worker loop and drops
/// the engine.
pub struct Browser {
    cmd_tx: Sender<Command>,
}

/// A handle to the session's page.
#[derive(Clone)]
pub struct Page {
    cmd_tx: Sender<Command>,
}

impl Browser {
    /// Launch an engine of type `E` on a new worker thread.
    pub async fn launch<E>(config: EngineConfig) -> Result<Self>
    where
        E: Engine + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            // Initialize engine on the worker thread
            let mut engine = match E::new(config) {
                Ok(e) => e,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop; ends on Close or when every handle is dropped
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Goto(url, resp) => {
                        let res = engine.load_url(&url);
                        let _ = resp.send(res);
                    }
                    Command::Eval(script, resp) => {
                        let res = engine.evaluate(&script);
                        let _ = resp.send(res);
                    }
                    Command::Screenshot(path_opt, resp) => {
                        let res = engine.render_png().and_then(|data| {
                            if let Some(path) = path_opt {
                                std::fs::write(&path, &data)?;
                            }
                            Ok(data)
                        });
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let res = engine.close();
                        let _ = resp.send(res);
                        return;
                    }
                }
            }
            debug!("browser handle dropped without close; releasing engine");
        });

        // Wait for the worker to report initialization success or failure
        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;

        Ok(Self { cmd_tx })
    }

    /// Open a page handle backed by the same worker thread.
    pub async fn new_page(&self) -> Result<Page> {
        Ok(Page {
            cmd_tx: self.cmd_tx.clone(),
        })
    }

    /// Shutdown the background worker and close the browser.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}

impl Page {
    /// Navigate to a URL
    pub async fn goto(&self, url: &str) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Goto(url.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Goto canceled: {}", e)))?
    }

    /// Evaluate a JavaScript expression and return its value
    pub async fn eval(&self, script: &str) -> Result<serde_json::Value> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Eval(script.to_string(), tx));
        rx.await
            .map_err(|e| Error::Other(format!("Eval canceled: {}", e)))?
    }

    /// Take a screenshot; if `path` is Some, the bytes are also written there.
    pub async fn screenshot(&self, path: Option<&Path>) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        let path_opt = path.map(Path::to_path_buf);
        let _ = self.cmd_tx.send(Command::Screenshot(path_opt, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Screenshot canceled: {}", e)))?
    }
}
